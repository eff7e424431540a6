//! Commands exposed to the frontend.

pub mod list;
pub mod study;
pub mod transfer;
pub mod words;
pub mod write;

use satzliste_core::{CodecError, LibraryError};

pub use list::{delete_sentence, list_sentences, speak_sentence, SentenceRow};
pub use study::{
    back_to_lessons, best_phrase_at, current_card, lesson_summaries, meanings_at, next_sentence,
    select_lesson, speak_current, speak_phrase, toggle_note, toggle_sentence, toggle_translation,
    StudyCard, StudyToken,
};
pub use transfer::{export_json, export_to_dir, import_json, ImportResult};
pub use words::{delete_word, edit_word, list_words, WordRow};
pub use write::{
    clear_draft, clear_selection, close_editor, delete_meaning, draft_view, edit_sentence,
    open_selection_editor, open_word_editor, save_meaning, save_sentence, set_note, set_source,
    set_target, tap_token, DraftToken, DraftView, MeaningEditor, WordChip,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<LibraryError> for CommandError {
    fn from(e: LibraryError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<CodecError> for CommandError {
    fn from(e: CodecError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self { message: e.to_string() }
    }
}
