//! Sentence collection, global dictionary and authoring drafts.
//!
//! Every saved sentence keeps a frozen snapshot of the meanings it was
//! saved with. The dictionary mutations here keep those snapshots in step
//! with global edits and deletes.

use crate::dictionary::{self, fold, lookup, GlobalDictionary, Layered, LocalOverrides, SnapshotView};
use crate::error::{LibraryError, Result};
use crate::lesson::{self, Lesson};
use crate::storage::{ExportBundle, ImportMode};
use crate::tokenizer::{tokenize, unique_words, words_only};
use crate::types::{MeaningMap, Sentence, SentenceId, Token};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The sentence being written or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub source: String,
    pub target: String,
    pub note: String,
    pub local: LocalOverrides,
    /// Set when the draft edits a saved sentence.
    pub editing: Option<SentenceId>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_save(&self) -> bool {
        !self.source.trim().is_empty() && !self.target.trim().is_empty()
    }

    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.source)
    }

    /// Distinct words of the source as `(key, label)`.
    pub fn words(&self) -> Vec<(String, String)> {
        unique_words(&self.source)
    }

    pub fn view<'a>(&'a self, global: &'a GlobalDictionary) -> Layered<'a> {
        Layered::new(&self.local, global)
    }

    pub fn meaning_for<'a>(&'a self, key: &str, global: &'a GlobalDictionary) -> Option<&'a str> {
        lookup(&fold(key), &self.local, global)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Owner of the sentence collection and the global dictionary.
#[derive(Debug, Clone, Default)]
pub struct Library {
    sentences: Vec<Sentence>,
    dictionary: GlobalDictionary,
    last_issued: i64,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(sentences: Vec<Sentence>, dictionary: GlobalDictionary) -> Self {
        let last_issued = Self::max_numeric_id(&sentences);
        Self {
            sentences,
            dictionary,
            last_issued,
        }
    }

    fn max_numeric_id(sentences: &[Sentence]) -> i64 {
        sentences
            .iter()
            .filter_map(|s| s.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn dictionary(&self) -> &GlobalDictionary {
        &self.dictionary
    }

    pub fn get(&self, id: &SentenceId) -> Option<&Sentence> {
        self.sentences.iter().find(|s| &s.id == id)
    }

    pub fn index_of(&self, id: &SentenceId) -> Option<usize> {
        self.sentences.iter().position(|s| &s.id == id)
    }

    /// Millisecond timestamp id, strictly greater than any issued so far.
    fn next_id(&mut self) -> SentenceId {
        let now = Utc::now().timestamp_millis();
        self.last_issued = now.max(self.last_issued + 1);
        SentenceId(self.last_issued.to_string())
    }

    // --- authoring ---

    /// Assign a meaning to a word or phrase of the draft.
    pub fn set_meaning(&mut self, draft: &mut Draft, key: &str, value: &str) -> Option<String> {
        dictionary::set_meaning(&mut draft.local, &mut self.dictionary, key, value)
    }

    /// Delete a meaning everywhere: the draft, the global dictionary and
    /// every saved snapshot. Returns how many snapshots were scrubbed.
    pub fn delete_meaning(&mut self, draft: Option<&mut Draft>, key: &str) -> usize {
        let key = fold(key);
        if let Some(draft) = draft {
            draft.local.remove(&key);
        }
        self.dictionary.remove(&key);

        let mut scrubbed = 0;
        for sentence in &mut self.sentences {
            if sentence.word_meanings.remove(&key).is_some() {
                scrubbed += 1;
            }
        }
        scrubbed
    }

    /// Edit a global meaning and carry it into every snapshot that
    /// already holds the key. A blank value deletes the meaning.
    /// Returns how many snapshots changed.
    pub fn rename_or_edit_global(&mut self, key: &str, new_value: &str) -> usize {
        let value = new_value.trim();
        if value.is_empty() {
            return self.delete_meaning(None, key);
        }

        let key = fold(key);
        self.dictionary.insert(&key, value);

        let mut updated = 0;
        for sentence in &mut self.sentences {
            if let Some(existing) = sentence.word_meanings.get_mut(&key) {
                *existing = value.to_string();
                updated += 1;
            }
        }
        updated
    }

    /// Meaning snapshot for a draft: every word of the source with a
    /// meaning (local first, then global), plus every local phrase entry.
    pub fn snapshot_for(&self, draft: &Draft) -> MeaningMap {
        let mut snapshot = MeaningMap::new();
        for word in words_only(&draft.source) {
            let key = fold(&word);
            if let Some(meaning) = lookup(&key, &draft.local, &self.dictionary) {
                snapshot.insert(key, meaning.to_string());
            }
        }
        for (key, meaning) in draft.local.values() {
            snapshot.insert(key.to_string(), meaning.to_string());
        }
        snapshot
    }

    /// Save the draft as a new sentence, or update the one it edits.
    ///
    /// The snapshot is also merged into the global dictionary. On success
    /// the draft is reset.
    pub fn save_draft(&mut self, draft: &mut Draft) -> Result<SentenceId> {
        let source = draft.source.trim();
        let target = draft.target.trim();
        if source.is_empty() {
            return Err(LibraryError::EmptySource);
        }
        if target.is_empty() {
            return Err(LibraryError::EmptyTarget);
        }

        let snapshot = self.snapshot_for(draft);
        let note = draft.note.trim().to_string();
        let (source, target) = (source.to_string(), target.to_string());

        let id = match &draft.editing {
            Some(id) => {
                let sentence = self
                    .sentences
                    .iter_mut()
                    .find(|s| &s.id == id)
                    .ok_or_else(|| LibraryError::SentenceNotFound(id.to_string()))?;
                sentence.source_text = source;
                sentence.target_text = target;
                sentence.word_meanings = snapshot.clone();
                sentence.note = note;
                id.clone()
            }
            None => {
                let id = self.next_id();
                self.sentences.push(Sentence {
                    id: id.clone(),
                    source_text: source,
                    target_text: target,
                    word_meanings: snapshot.clone(),
                    note,
                });
                id
            }
        };

        self.dictionary.merge(&snapshot);
        draft.clear();
        Ok(id)
    }

    /// Load a saved sentence into a fresh draft.
    pub fn edit(&self, id: &SentenceId) -> Result<Draft> {
        let sentence = self
            .get(id)
            .ok_or_else(|| LibraryError::SentenceNotFound(id.to_string()))?;
        Ok(Draft {
            source: sentence.source_text.clone(),
            target: sentence.target_text.clone(),
            note: sentence.note.clone(),
            local: LocalOverrides::from_snapshot(&sentence.word_meanings),
            editing: Some(sentence.id.clone()),
        })
    }

    /// Remove a sentence. Its meanings stay in the global dictionary.
    pub fn delete_sentence(&mut self, id: &SentenceId) -> Result<Sentence> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| LibraryError::SentenceNotFound(id.to_string()))?;
        Ok(self.sentences.remove(idx))
    }

    // --- browsing ---

    /// Sentences whose source or target contains the query, ignoring case.
    pub fn search_sentences(&self, query: &str) -> Vec<&Sentence> {
        let q = fold(query.trim());
        self.sentences
            .iter()
            .filter(|s| {
                q.is_empty() || fold(&s.source_text).contains(&q) || fold(&s.target_text).contains(&q)
            })
            .collect()
    }

    /// Dictionary entries whose key or meaning contains the query, in key
    /// order.
    pub fn search_words(&self, query: &str) -> Vec<(&str, &str)> {
        let q = fold(query.trim());
        self.dictionary
            .iter()
            .filter(|(key, meaning)| q.is_empty() || key.contains(&q) || fold(meaning).contains(&q))
            .collect()
    }

    /// Meaning view used while studying a saved sentence.
    pub fn study_view<'a>(&'a self, sentence: &'a Sentence) -> SnapshotView<'a> {
        SnapshotView::new(&sentence.word_meanings, &self.dictionary)
    }

    pub fn lessons(&self, block_size: usize) -> Vec<Lesson<'_>> {
        lesson::partition(&self.sentences, block_size)
    }

    pub fn lesson(&self, index: usize, block_size: usize) -> Option<Lesson<'_>> {
        self.lessons(block_size).into_iter().nth(index)
    }

    /// Number of sentences in a lesson; zero if it does not exist.
    pub fn lesson_len(&self, index: usize, block_size: usize) -> usize {
        self.lesson(index, block_size).map_or(0, |l| l.len())
    }

    pub fn lesson_of(&self, id: &SentenceId, block_size: usize) -> Option<usize> {
        self.index_of(id)
            .map(|idx| lesson::lesson_index_of(idx, block_size))
    }

    // --- transfer ---

    pub fn export(&self) -> ExportBundle {
        ExportBundle::new(self.sentences.clone(), self.dictionary.clone())
    }

    /// Apply an imported bundle. Returns how many sentences were added.
    pub fn import(&mut self, bundle: ExportBundle, mode: ImportMode) -> usize {
        let added = match mode {
            ImportMode::Merge => {
                let mut known: HashSet<SentenceId> =
                    self.sentences.iter().map(|s| s.id.clone()).collect();
                let before = self.sentences.len();
                for sentence in bundle.sentences {
                    if !sentence.id.as_str().is_empty() && known.insert(sentence.id.clone()) {
                        self.sentences.push(sentence);
                    }
                }
                self.dictionary.merge_missing(&bundle.dict);
                self.sentences.len() - before
            }
            ImportMode::Replace => {
                let mut known = HashSet::new();
                self.sentences = bundle
                    .sentences
                    .into_iter()
                    .filter(|s| !s.id.as_str().is_empty() && known.insert(s.id.clone()))
                    .collect();
                self.dictionary = bundle.dict;
                self.sentences.len()
            }
        };
        self.last_issued = self.last_issued.max(Self::max_numeric_id(&self.sentences));
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::MeaningLookup;
    use pretty_assertions::assert_eq;

    fn draft(source: &str, target: &str) -> Draft {
        Draft {
            source: source.into(),
            target: target.into(),
            ..Draft::default()
        }
    }

    fn saved(library: &mut Library, source: &str, target: &str, meanings: &[(&str, &str)]) -> SentenceId {
        let mut d = draft(source, target);
        for (k, v) in meanings {
            library.set_meaning(&mut d, k, v);
        }
        library.save_draft(&mut d).unwrap()
    }

    #[test]
    fn test_save_requires_both_texts() {
        let mut library = Library::new();
        assert_eq!(
            library.save_draft(&mut draft("  ", "x")),
            Err(LibraryError::EmptySource)
        );
        assert_eq!(
            library.save_draft(&mut draft("x", "")),
            Err(LibraryError::EmptyTarget)
        );
        assert!(library.sentences().is_empty());
    }

    #[test]
    fn test_save_snapshots_local_and_global() {
        let mut library = Library::new();
        saved(&mut library, "Der Hund", "Köpek", &[("hund", "köpek")]);

        let mut d = draft(" Der Hund bellt. ", " Köpek havlıyor ");
        library.set_meaning(&mut d, "bellt", "havlar");
        library.set_meaning(&mut d, "Hund bellt", "köpek havlar");
        let id = library.save_draft(&mut d).unwrap();

        let sentence = library.get(&id).unwrap();
        assert_eq!(sentence.source_text, "Der Hund bellt.");
        let expected: MeaningMap = [
            ("bellt".to_string(), "havlar".to_string()),
            ("hund".to_string(), "köpek".to_string()),
            ("hund bellt".to_string(), "köpek havlar".to_string()),
        ]
        .into();
        assert_eq!(sentence.word_meanings, expected);
        assert_eq!(library.dictionary().get("hund bellt"), Some("köpek havlar"));
        assert_eq!(d, Draft::default());
    }

    #[test]
    fn test_cleared_local_is_not_snapshotted() {
        let mut library = Library::new();
        saved(&mut library, "Haus", "Ev", &[("haus", "ev")]);
        let mut d = draft("Das Haus", "Ev");
        library.set_meaning(&mut d, "haus", "");
        let id = library.save_draft(&mut d).unwrap();
        assert!(library.get(&id).unwrap().word_meanings.is_empty());
        assert_eq!(library.dictionary().get("haus"), Some("ev"));
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut library = Library::new();
        let a = saved(&mut library, "a", "b", &[]);
        let b = saved(&mut library, "c", "d", &[]);
        let (a, b): (i64, i64) = (a.as_str().parse().unwrap(), b.as_str().parse().unwrap());
        assert!(b > a);
    }

    #[test]
    fn test_edit_keeps_id() {
        let mut library = Library::new();
        let id = saved(&mut library, "Haus", "Ev", &[("haus", "ev")]);
        let mut d = library.edit(&id).unwrap();
        assert_eq!(d.meaning_for("Haus", library.dictionary()), Some("ev"));
        d.target = "Bina".into();
        let same = library.save_draft(&mut d).unwrap();
        assert_eq!(same, id);
        assert_eq!(library.sentences().len(), 1);
        assert_eq!(library.get(&id).unwrap().target_text, "Bina");
    }

    #[test]
    fn test_edit_missing_sentence() {
        let library = Library::new();
        let id = SentenceId::from("404");
        assert_eq!(
            library.edit(&id),
            Err(LibraryError::SentenceNotFound("404".into()))
        );
    }

    #[test]
    fn test_cascade_delete_scrubs_snapshots() {
        let mut library = Library::new();
        let a = saved(&mut library, "Das Haus", "Ev", &[("haus", "ev")]);
        let b = saved(&mut library, "Ein Haus", "Bir ev", &[]);
        let c = saved(&mut library, "Ein Hund", "Bir köpek", &[("hund", "köpek")]);
        assert_eq!(library.get(&b).unwrap().word_meanings.get("haus").map(String::as_str), Some("ev"));

        let mut d = draft("Haus", "Ev");
        library.set_meaning(&mut d, "haus", "ev");
        assert_eq!(library.delete_meaning(Some(&mut d), "Haus"), 2);

        assert!(!library.get(&a).unwrap().word_meanings.contains_key("haus"));
        assert!(!library.get(&b).unwrap().word_meanings.contains_key("haus"));
        assert_eq!(library.get(&c).unwrap().word_meanings.len(), 1);
        assert_eq!(library.dictionary().get("haus"), None);
        assert_eq!(d.local.get("haus"), None);
    }

    #[test]
    fn test_global_edit_propagates() {
        let mut library = Library::new();
        let a = saved(&mut library, "Das Haus", "Ev", &[("haus", "ev")]);
        let b = saved(&mut library, "Der Hund", "Köpek", &[("hund", "köpek")]);
        assert_eq!(library.rename_or_edit_global("haus", " konut "), 1);
        assert_eq!(library.get(&a).unwrap().word_meanings["haus"], "konut");
        assert!(!library.get(&b).unwrap().word_meanings.contains_key("haus"));
        assert_eq!(library.dictionary().get("haus"), Some("konut"));
    }

    #[test]
    fn test_blank_global_edit_deletes() {
        let mut library = Library::new();
        let a = saved(&mut library, "Das Haus", "Ev", &[("haus", "ev")]);
        assert_eq!(library.rename_or_edit_global("haus", ""), 1);
        assert!(library.get(&a).unwrap().word_meanings.is_empty());
        assert!(library.dictionary().is_empty());
    }

    #[test]
    fn test_delete_sentence_keeps_meanings() {
        let mut library = Library::new();
        let id = saved(&mut library, "Haus", "Ev", &[("haus", "ev")]);
        library.delete_sentence(&id).unwrap();
        assert!(library.sentences().is_empty());
        assert_eq!(library.dictionary().get("haus"), Some("ev"));
        assert!(library.delete_sentence(&id).is_err());
    }

    #[test]
    fn test_search_ignores_case() {
        let mut library = Library::new();
        saved(&mut library, "Ich wohne in Istanbul", "İstanbul'da yaşıyorum", &[("wohne", "oturuyorum")]);
        saved(&mut library, "Guten Morgen", "Günaydın", &[]);
        assert_eq!(library.search_sentences("ISTANBUL").len(), 1);
        assert_eq!(library.search_sentences("günay").len(), 1);
        assert_eq!(library.search_sentences("").len(), 2);
        assert_eq!(library.search_words("OTUR"), vec![("wohne", "oturuyorum")]);
    }

    #[test]
    fn test_study_view_prefers_snapshot() {
        let mut library = Library::new();
        let id = saved(&mut library, "Das Haus", "Ev", &[("haus", "ev")]);
        library.rename_or_edit_global("das", "the");
        let sentence = library.get(&id).unwrap().clone();
        let view = library.study_view(&sentence);
        assert_eq!(view.meaning("haus"), Some("ev"));
        assert_eq!(view.meaning("das"), Some("the"));
    }

    #[test]
    fn test_lessons_follow_collection() {
        let mut library = Library::new();
        let mut ids = Vec::new();
        for i in 0..23 {
            ids.push(saved(&mut library, &format!("Satz {i}"), "x", &[]));
        }
        assert_eq!(library.lessons(10).len(), 3);
        assert_eq!(library.lesson_len(2, 10), 3);
        assert_eq!(library.lesson_len(3, 10), 0);
        assert_eq!(library.lesson_of(&ids[15], 10), Some(1));
    }

    #[test]
    fn test_import_merge_and_replace() {
        let mut library = Library::new();
        let id = saved(&mut library, "Haus", "Ev", &[("haus", "ev")]);

        let mut other = Library::new();
        saved(&mut other, "Hund", "Köpek", &[("hund", "köpek"), ("haus", "bina")]);
        let mut bundle = other.export();
        bundle.sentences[0].id = SentenceId::from("1");
        bundle.sentences.push(library.get(&id).unwrap().clone());

        assert_eq!(library.import(bundle.clone(), ImportMode::Merge), 1);
        assert_eq!(library.sentences().len(), 2);
        assert_eq!(library.dictionary().get("haus"), Some("ev"));
        assert_eq!(library.dictionary().get("hund"), Some("köpek"));

        assert_eq!(library.import(bundle, ImportMode::Replace), 2);
        assert_eq!(library.dictionary().get("haus"), Some("bina"));
    }

    #[test]
    fn test_merge_skips_repeated_ids_within_bundle() {
        let mut library = Library::new();
        let bundle = crate::storage::parse_import(
            r#"{"sentences": [
                {"id": "5", "sourceText": "Erste", "targetText": "Birinci"},
                {"id": "5", "sourceText": "Zweite", "targetText": "İkinci"},
                {"id": "", "sourceText": "Ohne", "targetText": "Yok"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(library.import(bundle.clone(), ImportMode::Replace), 1);
        assert_eq!(library.sentences().len(), 1);
        library.import(ExportBundle::default(), ImportMode::Replace);
        assert!(library.sentences().is_empty());

        assert_eq!(library.import(bundle, ImportMode::Merge), 1);
        let ids: Vec<&str> = library.sentences().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
        assert_eq!(library.get(&SentenceId::from("5")).unwrap().source_text, "Erste");
    }
}
