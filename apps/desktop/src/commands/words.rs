//! Global dictionary commands.

use super::CommandError;
use crate::state::AppState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRow {
    pub key: String,
    pub meaning: String,
    /// Saved sentences whose snapshot holds this key.
    pub sentence_count: usize,
}

/// Dictionary entries matching the query, in key order.
pub fn list_words(state: &AppState, query: &str) -> Vec<WordRow> {
    let sentences = state.library.sentences();
    state
        .library
        .search_words(query)
        .into_iter()
        .map(|(key, meaning)| WordRow {
            key: key.to_string(),
            meaning: meaning.to_string(),
            sentence_count: sentences
                .iter()
                .filter(|s| s.word_meanings.contains_key(key))
                .count(),
        })
        .collect()
}

/// Change a global meaning and the snapshots holding it.
/// A blank value deletes the word. Returns the number of sentences touched.
pub fn edit_word(state: &mut AppState, key: &str, value: &str) -> Result<usize, CommandError> {
    let updated = state.library.rename_or_edit_global(key, value);
    state.persist()?;
    tracing::debug!(key, updated, "word edited");
    Ok(updated)
}

/// Delete a word from the dictionary, the draft and every saved sentence.
pub fn delete_word(state: &mut AppState, key: &str) -> Result<usize, CommandError> {
    let scrubbed = state.library.delete_meaning(Some(&mut state.draft), key);
    state.persist()?;
    tracing::info!(key, scrubbed, "word deleted");
    Ok(scrubbed)
}
