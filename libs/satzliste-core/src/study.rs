//! Shuffled, non-repeating traversal of a lesson's sentences.
//!
//! The scheduler is an explicitly owned [`StudyState`]; callers pass the
//! lesson's current sentence count and a random source into every
//! transition, so independent sessions never share state.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unbiased Fisher-Yates permutation of `0..n`.
pub fn shuffle_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyPhase {
    /// No lesson, or a lesson with nothing to present.
    #[default]
    NoLessonSelected,
    /// Lesson chosen, no sentence shown yet.
    AwaitingFirstPick,
    /// A current sentence is active.
    Presenting,
}

/// Which parts of the current card the learner has revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub sentence: bool,
    pub translation: bool,
    pub note: bool,
}

/// Study session over one lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyState {
    phase: StudyPhase,
    lesson_index: Option<usize>,
    order: Vec<usize>,
    position: usize,
    pub reveal: Reveal,
}

impl StudyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> StudyPhase {
        self.phase
    }

    pub fn lesson_index(&self) -> Option<usize> {
        self.lesson_index
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Lesson-local index of the sentence on screen.
    pub fn current(&self) -> Option<usize> {
        match self.phase {
            StudyPhase::Presenting => self.order.get(self.position).copied(),
            _ => None,
        }
    }

    /// Choose a lesson without presenting anything yet.
    pub fn select_lesson(&mut self, lesson_index: usize) {
        *self = Self {
            phase: StudyPhase::AwaitingFirstPick,
            lesson_index: Some(lesson_index),
            ..Self::default()
        };
    }

    /// Generate a fresh permutation for the selected lesson and present
    /// its first entry. An empty lesson leaves nothing to present.
    pub fn begin<R: Rng + ?Sized>(&mut self, sentence_count: usize, rng: &mut R) -> Option<usize> {
        if self.lesson_index.is_none() {
            return None;
        }
        self.reveal = Reveal::default();
        self.position = 0;
        if sentence_count == 0 {
            self.order.clear();
            self.phase = StudyPhase::NoLessonSelected;
            return None;
        }
        self.order = shuffle_indices(sentence_count, rng);
        self.phase = StudyPhase::Presenting;
        self.current()
    }

    /// Select a lesson and present its first sentence.
    pub fn enter<R: Rng + ?Sized>(
        &mut self,
        lesson_index: usize,
        sentence_count: usize,
        rng: &mut R,
    ) -> Option<usize> {
        self.select_lesson(lesson_index);
        self.begin(sentence_count, rng)
    }

    /// Move to the next sentence of the permutation, wrapping around
    /// without reshuffling. If the lesson size changed since the
    /// permutation was generated, start over with a fresh one.
    pub fn advance<R: Rng + ?Sized>(&mut self, sentence_count: usize, rng: &mut R) -> Option<usize> {
        if self.lesson_index.is_none() || sentence_count == 0 {
            return None;
        }
        if self.order.len() != sentence_count {
            return self.begin(sentence_count, rng);
        }
        self.reveal = Reveal::default();
        self.position = (self.position + 1) % sentence_count;
        self.phase = StudyPhase::Presenting;
        self.current()
    }

    /// Regenerate when the lesson's sentence count no longer matches the
    /// permutation. Returns whether a new permutation was drawn.
    pub fn sync<R: Rng + ?Sized>(&mut self, sentence_count: usize, rng: &mut R) -> bool {
        if self.lesson_index.is_none() || self.order.len() == sentence_count {
            return false;
        }
        self.begin(sentence_count, rng);
        true
    }

    /// Back to lesson selection; the permutation is discarded.
    pub fn leave(&mut self) {
        *self = Self::default();
    }
}
