//! Saved sentence browsing commands.

use super::CommandError;
use crate::speech::say;
use crate::state::AppState;
use satzliste_core::lesson::lesson_index_of;
use satzliste_core::SentenceId;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceRow {
    pub id: SentenceId,
    pub source_text: String,
    pub target_text: String,
    pub note: String,
    pub meaning_count: usize,
    pub lesson_index: usize,
}

/// Saved sentences matching the query, in collection order.
pub fn list_sentences(state: &AppState, query: &str) -> Vec<SentenceRow> {
    let block_size = state.config.block_size;
    let matches: HashSet<&SentenceId> = state
        .library
        .search_sentences(query)
        .into_iter()
        .map(|s| &s.id)
        .collect();
    state
        .library
        .sentences()
        .iter()
        .enumerate()
        .filter(|(_, s)| matches.contains(&s.id))
        .map(|(idx, s)| SentenceRow {
            id: s.id.clone(),
            source_text: s.source_text.clone(),
            target_text: s.target_text.clone(),
            note: s.note.clone(),
            meaning_count: s.word_meanings.len(),
            lesson_index: lesson_index_of(idx, block_size),
        })
        .collect()
}

/// Remove a saved sentence; the dictionary keeps its meanings.
pub fn delete_sentence(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    let removed = state.library.delete_sentence(&SentenceId::from(id))?;
    if state.draft.editing.as_ref() == Some(&removed.id) {
        state.draft.editing = None;
    }
    state.persist()?;
    state.refresh_study();
    tracing::info!(id = %removed.id, "sentence deleted");
    Ok(())
}

/// Read a saved sentence aloud.
pub fn speak_sentence(state: &mut AppState, id: &str) -> Result<bool, CommandError> {
    let text = state
        .library
        .get(&SentenceId::from(id))
        .map(|s| s.source_text.clone())
        .ok_or_else(|| CommandError::new(format!("sentence not found: {id}")))?;
    let language = state.config.speech_language.clone();
    Ok(say(state.speaker.as_mut(), &text, &language))
}
