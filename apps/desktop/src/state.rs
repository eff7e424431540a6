//! Application state.

use crate::config::AppConfig;
use crate::db::{DbError, KeyValueStore};
use crate::speech::Speaker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use satzliste_core::storage::{
    encode_dictionary, encode_sentences, try_decode_dictionary, try_decode_sentences,
    DICTIONARY_KEY, SENTENCES_KEY,
};
use satzliste_core::{Draft, GlobalDictionary, Library, PhraseSelection, Sentence, StudyState};

/// Word or phrase whose meaning editor is open: `(key, label)`.
pub type OpenEditor = (String, String);

/// Global application state.
pub struct AppState {
    pub config: AppConfig,
    pub library: Library,
    pub draft: Draft,
    pub selection: PhraseSelection,
    pub editor: Option<OpenEditor>,
    pub study: StudyState,
    pub rng: StdRng,
    store: Box<dyn KeyValueStore>,
    pub speaker: Box<dyn Speaker>,
}

impl AppState {
    /// Hydrate the library from the store.
    ///
    /// Missing or unreadable values start out empty.
    pub fn open(
        config: AppConfig,
        store: Box<dyn KeyValueStore>,
        speaker: Box<dyn Speaker>,
    ) -> Self {
        let sentences = load_sentences(store.as_ref());
        let dictionary = load_dictionary(store.as_ref());
        tracing::info!(
            sentences = sentences.len(),
            words = dictionary.len(),
            "library loaded"
        );

        let rng = seeded_rng(config.shuffle_seed);
        Self {
            config,
            library: Library::from_parts(sentences, dictionary),
            draft: Draft::new(),
            selection: PhraseSelection::new(),
            editor: None,
            study: StudyState::new(),
            rng,
            store,
            speaker,
        }
    }

    /// Write both collections back to the store.
    pub fn persist(&mut self) -> Result<(), DbError> {
        let sentences = encode_sentences(self.library.sentences())?;
        let dictionary = encode_dictionary(self.library.dictionary())?;
        self.store.save(SENTENCES_KEY, &sentences)?;
        self.store.save(DICTIONARY_KEY, &dictionary)?;
        tracing::debug!(
            sentences = self.library.sentences().len(),
            words = self.library.dictionary().len(),
            "library persisted"
        );
        Ok(())
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Number of sentences in the lesson being studied.
    pub fn current_lesson_len(&self) -> usize {
        self.study
            .lesson_index()
            .map_or(0, |idx| self.library.lesson_len(idx, self.config.block_size))
    }

    /// Re-shuffle the study order if the collection change altered the
    /// size of the lesson being studied.
    pub fn refresh_study(&mut self) {
        let count = self.current_lesson_len();
        if self.study.sync(count, &mut self.rng) {
            tracing::debug!(count, "lesson size changed, order regenerated");
        }
    }

    /// Fresh randomness for a new lesson entry, unless a fixed seed is set.
    pub fn reseed(&mut self) {
        if self.config.shuffle_seed.is_none() {
            self.rng = StdRng::from_entropy();
        }
    }

    /// Sentence currently presented in study mode.
    pub fn current_sentence(&self) -> Option<&Sentence> {
        let lesson = self
            .library
            .lesson(self.study.lesson_index()?, self.config.block_size)?;
        lesson.get(self.study.current()?)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_sentences(store: &dyn KeyValueStore) -> Vec<Sentence> {
    match store.load(SENTENCES_KEY) {
        Ok(Some(bytes)) => try_decode_sentences(&bytes).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored sentences unreadable, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load sentences");
            Vec::new()
        }
    }
}

fn load_dictionary(store: &dyn KeyValueStore) -> GlobalDictionary {
    match store.load(DICTIONARY_KEY) {
        Ok(Some(bytes)) => try_decode_dictionary(&bytes).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored dictionary unreadable, starting empty");
            GlobalDictionary::new()
        }),
        Ok(None) => GlobalDictionary::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load dictionary");
            GlobalDictionary::new()
        }
    }
}
