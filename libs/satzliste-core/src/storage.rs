//! Persisted value layout and import/export bundles.
//!
//! Two independent JSON values are stored: an array of sentence records
//! and a flat `key -> meaning` object. Decoding is tolerant: the strict
//! `try_*` functions report why a payload was rejected, the plain ones
//! fall back to empty collections.

use crate::dictionary::{fold, GlobalDictionary};
use crate::error::CodecError;
use crate::types::{MeaningMap, Sentence};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store key of the sentence collection.
pub const SENTENCES_KEY: &str = "satzliste.sentences.v1";

/// Store key of the global dictionary.
pub const DICTIONARY_KEY: &str = "satzliste.dict.v1";

/// Decode the sentence array. Records that are not valid sentences are
/// skipped; snapshot keys are re-folded and blank meanings dropped.
pub fn try_decode_sentences(bytes: &[u8]) -> Result<Vec<Sentence>, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    sentences_from_value(value)
}

pub fn decode_sentences(bytes: &[u8]) -> Vec<Sentence> {
    try_decode_sentences(bytes).unwrap_or_default()
}

/// Decode the dictionary object. Non-string values are skipped.
pub fn try_decode_dictionary(bytes: &[u8]) -> Result<GlobalDictionary, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    dictionary_from_value(value)
}

pub fn decode_dictionary(bytes: &[u8]) -> GlobalDictionary {
    try_decode_dictionary(bytes).unwrap_or_default()
}

pub fn encode_sentences(sentences: &[Sentence]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(sentences)?)
}

pub fn encode_dictionary(dictionary: &GlobalDictionary) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(dictionary)?)
}

fn sentences_from_value(value: Value) -> Result<Vec<Sentence>, CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::NotAnArray);
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Sentence>(item).ok())
        .map(|mut sentence| {
            sentence.word_meanings = normalize_snapshot(&sentence.word_meanings);
            sentence
        })
        .collect())
}

fn dictionary_from_value(value: Value) -> Result<GlobalDictionary, CodecError> {
    let Value::Object(map) = value else {
        return Err(CodecError::NotAnObject);
    };
    Ok(GlobalDictionary::from_entries(
        map.iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key.as_str(), v))),
    ))
}

/// Fold keys and drop blank meanings of a snapshot.
pub fn normalize_snapshot(snapshot: &MeaningMap) -> MeaningMap {
    snapshot
        .iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (fold(key), value.to_string()))
        })
        .collect()
}

/// How an imported bundle is applied to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Append unknown sentences; existing meanings win over imported ones.
    Merge,
    /// Swap both collections for the imported ones.
    Replace,
}

/// Full backup of sentences and dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    pub sentences: Vec<Sentence>,
    pub dict: GlobalDictionary,
}

impl ExportBundle {
    pub fn new(sentences: Vec<Sentence>, dict: GlobalDictionary) -> Self {
        Self {
            exported_at: Some(Utc::now()),
            sentences,
            dict,
        }
    }

    /// File name suggested for this export.
    pub fn file_name(&self) -> String {
        let stamp = self.exported_at.unwrap_or_else(Utc::now);
        format!("satzliste-{}.json", stamp.format("%Y-%m-%dT%H-%M-%S"))
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse an exported file.
///
/// Sentences may be found under `sentences` or `Sentences`, meanings under
/// `dict`, `words` or `dictionary`. Missing parts default to empty;
/// parts of the wrong shape reject the whole file.
pub fn parse_import(text: &str) -> Option<ExportBundle> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };

    let sentences = ["sentences", "Sentences"]
        .iter()
        .find_map(|k| root.remove(*k))
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let dict = ["dict", "words", "dictionary"]
        .iter()
        .find_map(|k| root.remove(*k))
        .unwrap_or_else(|| Value::Object(Default::default()));

    Some(ExportBundle {
        exported_at: None,
        sentences: sentences_from_value(sentences).ok()?,
        dict: dictionary_from_value(dict).ok()?,
    })
}
