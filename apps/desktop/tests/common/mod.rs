//! Shared fixtures for the application integration tests.

#![allow(dead_code)]

use satzliste_lib::commands::{save_meaning, save_sentence, set_source, set_target, open_word_editor};
use satzliste_lib::config::AppConfig;
use satzliste_lib::db::MemoryStore;
use satzliste_lib::speech::Speaker;
use satzliste_lib::state::AppState;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Utterances recorded as `(text, language)`.
pub type Spoken = Rc<RefCell<Vec<(String, String)>>>;

/// Speaker that remembers what it was asked to say.
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Spoken,
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str, language: &str) {
        self.spoken
            .borrow_mut()
            .push((text.to_string(), language.to_string()));
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        db_path: PathBuf::from(":memory:"),
        speech_language: "de-DE".to_string(),
        block_size: 10,
        max_phrase_span: 5,
        shuffle_seed: Some(7),
    }
}

/// Fresh state over the given store, plus a handle to its spoken log.
pub fn state_with(store: MemoryStore) -> (AppState, Spoken) {
    let speaker = RecordingSpeaker::default();
    let spoken = Rc::clone(&speaker.spoken);
    let state = AppState::open(test_config(), Box::new(store), Box::new(speaker));
    (state, spoken)
}

pub fn empty_state() -> AppState {
    state_with(MemoryStore::new()).0
}

/// Author and save a sentence with word meanings.
pub fn add_sentence(
    state: &mut AppState,
    source: &str,
    target: &str,
    meanings: &[(&str, &str)],
) -> String {
    set_source(state, source);
    set_target(state, target);
    for (word, meaning) in meanings {
        open_word_editor(state, word).expect("open editor");
        save_meaning(state, meaning).expect("save meaning");
    }
    save_sentence(state).expect("save sentence").to_string()
}

/// Save `n` numbered sentences without meanings.
pub fn add_numbered(state: &mut AppState, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| add_sentence(state, &format!("Satz {i}"), &format!("Cümle {i}"), &[]))
        .collect()
}
