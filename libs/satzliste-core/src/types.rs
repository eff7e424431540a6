//! Core types for the sentence workbook.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a token run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Separator,
}

/// A classified run of characters.
///
/// Concatenating the `text` of every token of a sentence, in order,
/// yields the sentence back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Stable identifier of a saved sentence. Assigned once, never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SentenceId(pub String);

// Older exports may carry numeric ids.
impl<'de> Deserialize<'de> for SentenceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

impl SentenceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SentenceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Meaning snapshot of a sentence: dictionary key -> meaning.
pub type MeaningMap = BTreeMap<String, String>;

/// A saved sentence with its translation and frozen word meanings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub id: SentenceId,
    #[serde(alias = "german")]
    pub source_text: String,
    #[serde(alias = "turkish")]
    pub target_text: String,
    #[serde(default, alias = "words")]
    pub word_meanings: MeaningMap,
    #[serde(default)]
    pub note: String,
}

/// A resolved word or phrase meaning.
///
/// `start` and `end` are token positions (both word tokens, inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub label: String,
    pub key: String,
    pub meaning: String,
    pub start: usize,
    pub end: usize,
}

/// Tunables consumed by the phrase resolver and the lesson partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySettings {
    pub block_size: usize,
    pub max_phrase_span: usize,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            block_size: 10,
            max_phrase_span: 5,
        }
    }
}
