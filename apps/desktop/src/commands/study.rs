//! Study mode commands.

use super::CommandError;
use crate::speech::say;
use crate::state::AppState;
use satzliste_core::lesson::summaries;
use satzliste_core::{
    best_phrase_from, meanings_covering, tokenize, LessonSummary, PhraseMatch, Reveal, StudyPhase,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyToken {
    pub index: usize,
    pub text: String,
    pub is_word: bool,
    /// Whether any meaning covers this token.
    pub known: bool,
}

/// What the learner sees of the current sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyCard {
    pub lesson_index: usize,
    pub position: usize,
    pub lesson_len: usize,
    pub reveal: Reveal,
    /// Present once the sentence is revealed.
    pub tokens: Option<Vec<StudyToken>>,
    pub translation: Option<String>,
    pub note: Option<String>,
    pub has_note: bool,
}

pub fn lesson_summaries(state: &AppState) -> Vec<LessonSummary> {
    summaries(state.library.sentences(), state.config.block_size)
}

/// Enter a lesson with a fresh shuffle and present its first sentence.
pub fn select_lesson(state: &mut AppState, lesson_index: usize) -> Option<StudyCard> {
    let count = state.library.lesson_len(lesson_index, state.config.block_size);
    state.reseed();
    state.study.enter(lesson_index, count, &mut state.rng);
    tracing::debug!(lesson_index, count, "lesson entered");
    current_card(state)
}

/// Present the next sentence of the shuffled order.
pub fn next_sentence(state: &mut AppState) -> Option<StudyCard> {
    let count = state.current_lesson_len();
    state.study.advance(count, &mut state.rng);
    current_card(state)
}

pub fn back_to_lessons(state: &mut AppState) {
    state.study.leave();
}

pub fn current_card(state: &AppState) -> Option<StudyCard> {
    if state.study.phase() != StudyPhase::Presenting {
        return None;
    }
    let sentence = state.current_sentence()?;
    let reveal = state.study.reveal;
    let note = sentence.note.trim();

    let tokens = reveal.sentence.then(|| {
        let view = state.library.study_view(sentence);
        let tokens = tokenize(&sentence.source_text);
        tokens
            .iter()
            .enumerate()
            .map(|(index, token)| StudyToken {
                index,
                text: token.text.clone(),
                is_word: token.is_word(),
                known: token.is_word()
                    && !meanings_covering(&tokens, index, &view, state.config.max_phrase_span)
                        .is_empty(),
            })
            .collect()
    });

    Some(StudyCard {
        lesson_index: state.study.lesson_index()?,
        position: state.study.position(),
        lesson_len: state.study.order().len(),
        reveal,
        tokens,
        translation: reveal.translation.then(|| sentence.target_text.clone()),
        note: (reveal.note && !note.is_empty()).then(|| note.to_string()),
        has_note: !note.is_empty(),
    })
}

pub fn toggle_sentence(state: &mut AppState) -> Option<StudyCard> {
    state.study.reveal.sentence = !state.study.reveal.sentence;
    current_card(state)
}

pub fn toggle_translation(state: &mut AppState) -> Option<StudyCard> {
    state.study.reveal.translation = !state.study.reveal.translation;
    current_card(state)
}

pub fn toggle_note(state: &mut AppState) -> Option<StudyCard> {
    state.study.reveal.note = !state.study.reveal.note;
    current_card(state)
}

/// Every meaning covering a tapped token of the current sentence.
pub fn meanings_at(state: &AppState, token_index: usize) -> Vec<PhraseMatch> {
    let Some(sentence) = state.current_sentence() else {
        return Vec::new();
    };
    let view = state.library.study_view(sentence);
    let tokens = tokenize(&sentence.source_text);
    meanings_covering(&tokens, token_index, &view, state.config.max_phrase_span)
}

/// Longest known phrase starting at a token of the current sentence.
pub fn best_phrase_at(state: &AppState, token_index: usize) -> Option<PhraseMatch> {
    let sentence = state.current_sentence()?;
    let view = state.library.study_view(sentence);
    best_phrase_from(
        &tokenize(&sentence.source_text),
        token_index,
        &view,
        state.config.max_phrase_span,
    )
}

/// Read the current sentence aloud.
pub fn speak_current(state: &mut AppState) -> Result<bool, CommandError> {
    let text = state
        .current_sentence()
        .map(|s| s.source_text.clone())
        .ok_or_else(|| CommandError::new("no sentence is being studied"))?;
    let language = state.config.speech_language.clone();
    Ok(say(state.speaker.as_mut(), &text, &language))
}

/// Read a phrase label aloud, e.g. one returned by [`meanings_at`].
pub fn speak_phrase(state: &mut AppState, label: &str) -> bool {
    let language = state.config.speech_language.clone();
    say(state.speaker.as_mut(), label, &language)
}
