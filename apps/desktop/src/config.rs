//! Application configuration.

use satzliste_core::{StudySettings, DEFAULT_BLOCK_SIZE, MAX_PHRASE_SPAN};
use std::path::PathBuf;

/// Runtime configuration of the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Language tag passed to the speech backend for source-language text.
    pub speech_language: String,
    pub block_size: usize,
    pub max_phrase_span: usize,
    /// Fixed shuffle seed; fresh entropy per lesson entry when unset.
    pub shuffle_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            speech_language: "de-DE".to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            max_phrase_span: MAX_PHRASE_SPAN,
            shuffle_seed: None,
        }
    }
}

impl AppConfig {
    /// Load from environment (and a `.env` file if present).
    ///
    /// Env vars:
    /// - SATZLISTE_DB_PATH: database file
    /// - SATZLISTE_SPEECH_LANG: speech language tag
    /// - SATZLISTE_BLOCK_SIZE: sentences per lesson
    /// - SATZLISTE_MAX_PHRASE_SPAN: longest phrase in words
    /// - SATZLISTE_SHUFFLE_SEED: fixed shuffle seed
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: var("SATZLISTE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            speech_language: var("SATZLISTE_SPEECH_LANG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.speech_language),
            block_size: positive(var("SATZLISTE_BLOCK_SIZE")).unwrap_or(defaults.block_size),
            max_phrase_span: positive(var("SATZLISTE_MAX_PHRASE_SPAN"))
                .unwrap_or(defaults.max_phrase_span),
            shuffle_seed: var("SATZLISTE_SHUFFLE_SEED").and_then(|v| v.trim().parse().ok()),
        }
    }

    pub fn study_settings(&self) -> StudySettings {
        StudySettings {
            block_size: self.block_size,
            max_phrase_span: self.max_phrase_span,
        }
    }
}

fn positive(value: Option<String>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Database location under the user's local data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("satzliste")
        .join("satzliste.db")
}
