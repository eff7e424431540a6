//! Satzliste application shell: persistence, speech and the commands
//! driving the sentence workbook.

pub mod commands;
pub mod config;
pub mod db;
pub mod speech;
pub mod state;

use anyhow::Context;
use config::AppConfig;
use db::SqliteStore;
use speech::TracingSpeaker;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the log subscriber. Filter comes from `RUST_LOG`, default `info`.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}

/// Open the on-disk library described by `config`.
pub fn open_app(config: AppConfig) -> anyhow::Result<AppState> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    tracing::info!(path = %config.db_path.display(), "database opened");

    Ok(AppState::open(
        config,
        Box::new(store),
        Box::new(TracingSpeaker),
    ))
}

/// Initialize logging and open the library from environment config.
pub fn run() -> anyhow::Result<AppState> {
    init_logging();
    open_app(AppConfig::from_env())
}
