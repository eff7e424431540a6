//! Two-tier meaning dictionary.
//!
//! A draft sentence carries [`LocalOverrides`] that shadow the
//! process-wide [`GlobalDictionary`]. A local entry may be explicitly
//! [`LocalMeaning::Cleared`], which hides the global meaning for that
//! draft without touching the global entry.

use crate::types::MeaningMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Case-fold a word or phrase label into a dictionary key.
///
/// Unicode lowercase, except that capital `İ` becomes a plain `i`.
/// Capital `I` also folds to `i`, and a lowercase dotless `ı` is left as is.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' | 'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Read access to a key -> meaning mapping.
pub trait MeaningLookup {
    /// Meaning stored for an already folded key.
    fn meaning(&self, key: &str) -> Option<&str>;

    /// Whether the mapping can hold any meaning at all.
    fn is_empty(&self) -> bool;
}

impl MeaningLookup for MeaningMap {
    fn meaning(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str).filter(|m| !m.is_empty())
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

/// Process-lifetime dictionary. Keys are folded, values are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalDictionary {
    entries: MeaningMap,
}

impl<'de> Deserialize<'de> for GlobalDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        MeaningMap::deserialize(deserializer).map(Self::from_entries)
    }
}

impl GlobalDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries, folding keys and dropping blank meanings.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.insert(key.as_ref(), value.as_ref());
        }
        dict
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a meaning. A blank value removes the key instead.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = fold(key);
        let value = value.trim();
        if value.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value.to_string());
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&fold(key))
    }

    /// Overwrite with every entry of `other`.
    pub fn merge(&mut self, other: &MeaningMap) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    /// Add entries of `other` whose key is not present yet.
    pub fn merge_missing(&mut self, other: &GlobalDictionary) {
        for (key, value) in &other.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &MeaningMap {
        &self.entries
    }
}

impl MeaningLookup for GlobalDictionary {
    fn meaning(&self, key: &str) -> Option<&str> {
        self.get(key)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A local override value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalMeaning {
    /// Explicitly no meaning for this draft, even if the global one exists.
    Cleared,
    Value(String),
}

/// Overrides scoped to the sentence being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalOverrides {
    entries: BTreeMap<String, LocalMeaning>,
}

impl LocalOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed overrides from a saved sentence snapshot.
    pub fn from_snapshot(snapshot: &MeaningMap) -> Self {
        let mut local = Self::new();
        for (key, value) in snapshot {
            local.set(key, value);
        }
        local
    }

    pub fn get(&self, key: &str) -> Option<&LocalMeaning> {
        self.entries.get(key)
    }

    /// Store a value; a blank value marks the key as cleared.
    pub fn set(&mut self, key: &str, value: &str) {
        let value = value.trim();
        let entry = if value.is_empty() {
            LocalMeaning::Cleared
        } else {
            LocalMeaning::Value(value.to_string())
        };
        self.entries.insert(fold(key), entry);
    }

    pub fn clear(&mut self, key: &str) {
        self.entries.insert(fold(key), LocalMeaning::Cleared);
    }

    pub fn remove(&mut self, key: &str) -> Option<LocalMeaning> {
        self.entries.remove(&fold(key))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with an actual (non-cleared) value.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            LocalMeaning::Value(m) => Some((k.as_str(), m.as_str())),
            LocalMeaning::Cleared => None,
        })
    }
}

/// Resolve a key with local-over-global precedence.
///
/// A cleared local entry hides the global meaning.
pub fn lookup<'a>(
    key: &str,
    local: &'a LocalOverrides,
    global: &'a GlobalDictionary,
) -> Option<&'a str> {
    match local.get(key) {
        Some(LocalMeaning::Value(value)) => Some(value.as_str()),
        Some(LocalMeaning::Cleared) => None,
        None => global.get(key),
    }
}

/// Store a meaning for the current draft.
///
/// A non-blank value is written locally and promoted to the global
/// dictionary. A blank value only clears the key for this draft; purging
/// the global entry is a separate, explicit delete.
pub fn set_meaning(
    local: &mut LocalOverrides,
    global: &mut GlobalDictionary,
    key: &str,
    value: &str,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        local.clear(key);
        return None;
    }
    local.set(key, value);
    global.insert(key, value);
    Some(value.to_string())
}

/// Draft view: local overrides over the global dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Layered<'a> {
    pub local: &'a LocalOverrides,
    pub global: &'a GlobalDictionary,
}

impl<'a> Layered<'a> {
    pub fn new(local: &'a LocalOverrides, global: &'a GlobalDictionary) -> Self {
        Self { local, global }
    }
}

impl MeaningLookup for Layered<'_> {
    fn meaning(&self, key: &str) -> Option<&str> {
        lookup(key, self.local, self.global)
    }

    fn is_empty(&self) -> bool {
        self.local.values().next().is_none() && self.global.is_empty()
    }
}

/// Study view: a saved sentence snapshot over the live global dictionary.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotView<'a> {
    pub snapshot: &'a MeaningMap,
    pub global: &'a GlobalDictionary,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: &'a MeaningMap, global: &'a GlobalDictionary) -> Self {
        Self { snapshot, global }
    }
}

impl MeaningLookup for SnapshotView<'_> {
    fn meaning(&self, key: &str) -> Option<&str> {
        self.snapshot
            .meaning(key)
            .or_else(|| self.global.get(key))
    }

    fn is_empty(&self) -> bool {
        MeaningLookup::is_empty(self.snapshot) && self.global.is_empty()
    }
}
