//! Sentence authoring commands.

use super::CommandError;
use crate::state::AppState;
use satzliste_core::{fold, LibraryError, SentenceId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftToken {
    pub index: usize,
    pub text: String,
    pub is_word: bool,
    pub selected: bool,
    pub meaning: Option<String>,
}

/// Distinct word of the draft with its effective meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordChip {
    pub key: String,
    pub label: String,
    pub meaning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeaningEditor {
    pub key: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftView {
    pub source: String,
    pub target: String,
    pub note: String,
    pub tokens: Vec<DraftToken>,
    pub words: Vec<WordChip>,
    pub selection: Option<String>,
    pub editor: Option<MeaningEditor>,
    pub editing: Option<SentenceId>,
    pub can_save: bool,
}

/// Render the draft with its meanings and selection.
pub fn draft_view(state: &AppState) -> DraftView {
    let draft = &state.draft;
    let global = state.library.dictionary();
    let tokens = draft.tokens();

    DraftView {
        source: draft.source.clone(),
        target: draft.target.clone(),
        note: draft.note.clone(),
        tokens: tokens
            .iter()
            .enumerate()
            .map(|(index, token)| DraftToken {
                index,
                text: token.text.clone(),
                is_word: token.is_word(),
                selected: state.selection.contains(index),
                meaning: token
                    .is_word()
                    .then(|| draft.meaning_for(&token.text, global))
                    .flatten()
                    .map(str::to_string),
            })
            .collect(),
        words: draft
            .words()
            .into_iter()
            .map(|(key, label)| WordChip {
                meaning: draft.meaning_for(&key, global).map(str::to_string),
                key,
                label,
            })
            .collect(),
        selection: state.selection.label(&tokens).map(|(label, _)| label),
        editor: state.editor.as_ref().map(|(key, label)| MeaningEditor {
            value: draft.meaning_for(key, global).unwrap_or_default().to_string(),
            key: key.clone(),
            label: label.clone(),
        }),
        editing: draft.editing.clone(),
        can_save: draft.can_save(),
    }
}

/// Replace the source text. Token indices shift, so the selection resets.
pub fn set_source(state: &mut AppState, text: &str) {
    state.draft.source = text.to_string();
    state.selection.clear();
}

pub fn set_target(state: &mut AppState, text: &str) {
    state.draft.target = text.to_string();
}

pub fn set_note(state: &mut AppState, text: &str) {
    state.draft.note = text.to_string();
}

pub fn tap_token(state: &mut AppState, index: usize) {
    let tokens = state.draft.tokens();
    state.selection.tap(&tokens, index);
}

pub fn clear_selection(state: &mut AppState) {
    state.selection.clear();
}

/// Open the meaning editor for a single word.
pub fn open_word_editor(state: &mut AppState, word: &str) -> Result<(), CommandError> {
    let label = word.trim();
    if label.is_empty() {
        return Err(LibraryError::EmptySelection.into());
    }
    state.editor = Some((fold(label), label.to_string()));
    Ok(())
}

/// Open the meaning editor for the selected words.
pub fn open_selection_editor(state: &mut AppState) -> Result<(), CommandError> {
    let tokens = state.draft.tokens();
    let (label, key) = state
        .selection
        .label(&tokens)
        .ok_or(LibraryError::EmptySelection)?;
    state.editor = Some((key, label));
    Ok(())
}

pub fn close_editor(state: &mut AppState) {
    state.close_editor();
}

fn open_key(state: &AppState) -> Result<String, CommandError> {
    state
        .editor
        .as_ref()
        .map(|(key, _)| key.clone())
        .ok_or_else(|| CommandError::new("no meaning editor is open"))
}

/// Store the edited meaning for the draft and the dictionary.
/// A blank value only clears it for this draft.
pub fn save_meaning(state: &mut AppState, value: &str) -> Result<Option<String>, CommandError> {
    let key = open_key(state)?;
    let stored = state.library.set_meaning(&mut state.draft, &key, value);
    state.persist()?;
    state.close_editor();
    state.selection.clear();
    Ok(stored)
}

/// Delete the edited meaning everywhere, including saved sentences.
pub fn delete_meaning(state: &mut AppState) -> Result<usize, CommandError> {
    let key = open_key(state)?;
    let scrubbed = state.library.delete_meaning(Some(&mut state.draft), &key);
    state.persist()?;
    state.close_editor();
    state.selection.clear();
    tracing::info!(key = %key, scrubbed, "meaning deleted");
    Ok(scrubbed)
}

/// Save the draft and start a fresh one.
pub fn save_sentence(state: &mut AppState) -> Result<SentenceId, CommandError> {
    let id = state.library.save_draft(&mut state.draft)?;
    state.selection.clear();
    state.close_editor();
    state.persist()?;
    state.refresh_study();
    tracing::info!(id = %id, total = state.library.sentences().len(), "sentence saved");
    Ok(id)
}

pub fn clear_draft(state: &mut AppState) {
    state.draft.clear();
    state.selection.clear();
    state.close_editor();
}

/// Load a saved sentence into the draft for editing.
pub fn edit_sentence(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    state.draft = state.library.edit(&SentenceId::from(id))?;
    state.selection.clear();
    state.close_editor();
    Ok(())
}
