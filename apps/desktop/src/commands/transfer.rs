//! Backup export and import commands.

use super::CommandError;
use crate::state::AppState;
use satzliste_core::storage::parse_import;
use satzliste_core::ImportMode;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub added: usize,
    pub sentences: usize,
    pub words: usize,
}

/// Full backup as pretty-printed JSON.
pub fn export_json(state: &AppState) -> Result<String, CommandError> {
    Ok(state.library.export().to_json()?)
}

/// Write a timestamped backup file into `dir`. Returns its path.
pub fn export_to_dir(state: &AppState, dir: &Path) -> Result<PathBuf, CommandError> {
    let bundle = state.library.export();
    fs::create_dir_all(dir)?;
    let path = dir.join(bundle.file_name());
    fs::write(&path, bundle.to_json()?)?;
    tracing::info!(path = %path.display(), "library exported");
    Ok(path)
}

/// Apply an exported file to the library.
pub fn import_json(
    state: &mut AppState,
    text: &str,
    mode: ImportMode,
) -> Result<ImportResult, CommandError> {
    let bundle = parse_import(text).ok_or_else(|| CommandError::new("invalid backup file"))?;
    let added = state.library.import(bundle, mode);
    let stale = state
        .draft
        .editing
        .as_ref()
        .is_some_and(|id| state.library.get(id).is_none());
    if stale {
        state.draft.editing = None;
    }
    state.persist()?;
    state.refresh_study();

    let result = ImportResult {
        added,
        sentences: state.library.sentences().len(),
        words: state.library.dictionary().len(),
    };
    tracing::info!(?mode, added, sentences = result.sentences, "library imported");
    Ok(result)
}
