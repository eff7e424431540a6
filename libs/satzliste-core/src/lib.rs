//! Core sentence-workbook library shared by the application shell.
//!
//! Provides:
//! - Lossless word/separator tokenizer
//! - Two-tier meaning dictionary (draft overrides over a global map)
//! - Word and phrase meaning resolution
//! - Lesson partitioning and the shuffled study scheduler
//! - Sentence library with cascading dictionary edits
//! - Persisted JSON layout and import/export bundles

pub mod dictionary;
pub mod error;
pub mod lesson;
pub mod library;
pub mod phrase;
pub mod storage;
pub mod study;
pub mod tokenizer;
pub mod types;

pub use dictionary::{
    fold, lookup, GlobalDictionary, Layered, LocalMeaning, LocalOverrides, MeaningLookup,
    SnapshotView,
};
pub use error::{CodecError, LibraryError, Result};
pub use lesson::{
    lesson_count, lesson_index_of, partition, summaries, Lesson, LessonSummary, DEFAULT_BLOCK_SIZE,
};
pub use library::{Draft, Library};
pub use phrase::{
    best_phrase_from, meanings_covering, selection_label, PhraseSelection, MAX_PHRASE_SPAN,
};
pub use storage::{ExportBundle, ImportMode};
pub use study::{shuffle_indices, Reveal, StudyPhase, StudyState};
pub use tokenizer::{tokenize, unique_words, words_only};
pub use types::{MeaningMap, PhraseMatch, Sentence, SentenceId, StudySettings, Token, TokenKind};
