//! Single-word and multi-word meaning resolution over a token sequence.
//!
//! A phrase is a chain of word tokens where each next word follows the
//! previous one through exactly one separator token
//! (`word, separator, word, ...`). Its lookup label is the word texts
//! joined by single spaces, folded into a dictionary key. Phrases are
//! bounded to a few words so lookups stay interactive.

use crate::dictionary::{fold, MeaningLookup};
use crate::types::{PhraseMatch, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest phrase, in words, considered during resolution.
pub const MAX_PHRASE_SPAN: usize = 5;

/// Walks the word chain starting at a token, yielding `(end, label)` for
/// spans of 1, 2, ... words.
struct Extensions<'a> {
    tokens: &'a [Token],
    next: Option<usize>,
    remaining: usize,
    label: String,
}

impl<'a> Extensions<'a> {
    fn new(tokens: &'a [Token], start: usize, max_span: usize) -> Self {
        Self {
            tokens,
            next: Some(start),
            remaining: max_span,
            label: String::new(),
        }
    }
}

impl Iterator for Extensions<'_> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next.take()?;
        let word = self.tokens.get(idx).filter(|t| t.is_word())?;

        if !self.label.is_empty() {
            self.label.push(' ');
        }
        self.label.push_str(&word.text);
        self.remaining -= 1;

        self.next = match (self.tokens.get(idx + 1), self.tokens.get(idx + 2)) {
            (Some(sep), Some(next_word))
                if sep.kind == TokenKind::Separator && next_word.is_word() =>
            {
                Some(idx + 2)
            }
            _ => None,
        };

        Some((idx, self.label.clone()))
    }
}

/// Longest phrase with a stored meaning that starts at `start`.
///
/// Spans of 1 to `max_span` words (normally [`MAX_PHRASE_SPAN`]) are
/// tried in order; a longer match always replaces a shorter one. `None`
/// if `start` is not a word or no span has a meaning.
pub fn best_phrase_from(
    tokens: &[Token],
    start: usize,
    dict: &impl MeaningLookup,
    max_span: usize,
) -> Option<PhraseMatch> {
    if dict.is_empty() {
        return None;
    }

    let mut best = None;
    for (end, label) in Extensions::new(tokens, start, max_span) {
        let key = fold(&label);
        if let Some(meaning) = dict.meaning(&key) {
            best = Some(PhraseMatch {
                meaning: meaning.to_string(),
                label,
                key,
                start,
                end,
            });
        }
    }
    best
}

/// Every distinct meaning whose span covers `position`.
///
/// The word at `position` comes first when it has a meaning of its own,
/// followed by phrase matches ordered by start position, then by length.
/// Duplicate keys keep their first occurrence. A separator position
/// yields nothing.
pub fn meanings_covering(
    tokens: &[Token],
    position: usize,
    dict: &impl MeaningLookup,
    max_span: usize,
) -> Vec<PhraseMatch> {
    let mut results = Vec::new();
    let Some(word) = tokens.get(position).filter(|t| t.is_word()) else {
        return results;
    };
    if dict.is_empty() || max_span == 0 {
        return results;
    }

    let mut seen = HashSet::new();
    let single_key = fold(&word.text);
    if let Some(meaning) = dict.meaning(&single_key) {
        results.push(PhraseMatch {
            label: word.text.clone(),
            key: single_key.clone(),
            meaning: meaning.to_string(),
            start: position,
            end: position,
        });
        seen.insert(single_key);
    }

    let first = position.saturating_sub(max_span - 1);
    for start in first..=position {
        if !tokens[start].is_word() {
            continue;
        }
        for (end, label) in Extensions::new(tokens, start, max_span) {
            if end < position {
                continue;
            }
            let key = fold(&label);
            if seen.contains(&key) {
                continue;
            }
            if let Some(meaning) = dict.meaning(&key) {
                results.push(PhraseMatch {
                    meaning: meaning.to_string(),
                    label,
                    key: key.clone(),
                    start,
                    end,
                });
                seen.insert(key);
            }
        }
    }

    results
}

/// Label and key of the words inside the inclusive token range `a..=b`
/// (in either order). `None` when the range holds no word.
pub fn selection_label(tokens: &[Token], a: usize, b: usize) -> Option<(String, String)> {
    let (lo, hi) = (a.min(b), a.max(b));
    let words: Vec<&str> = tokens
        .iter()
        .skip(lo)
        .take(hi.saturating_sub(lo) + 1)
        .filter(|t| t.is_word())
        .map(|t| t.text.as_str())
        .collect();

    if words.is_empty() {
        return None;
    }
    let label = words.join(" ");
    let key = fold(&label);
    Some((label, key))
}

/// Multi-word selection made by tapping words while authoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSelection {
    start: Option<usize>,
    end: Option<usize>,
}

impl PhraseSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap on token `idx`.
    ///
    /// The first tap anchors a one-word selection, the second extends it
    /// to a range, and a tap while a range is active starts over.
    /// Separator taps are ignored.
    pub fn tap(&mut self, tokens: &[Token], idx: usize) {
        if !tokens.get(idx).is_some_and(Token::is_word) {
            return;
        }
        match (self.start, self.end) {
            (Some(s), Some(e)) if s != e => {
                self.start = Some(idx);
                self.end = Some(idx);
            }
            (Some(_), _) => self.end = Some(idx),
            (None, _) => {
                self.start = Some(idx);
                self.end = Some(idx);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Ordered inclusive token range of the selection.
    pub fn range(&self) -> Option<(usize, usize)> {
        let start = self.start?;
        let end = self.end.unwrap_or(start);
        Some((start.min(end), start.max(end)))
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.range().is_some_and(|(lo, hi)| lo <= idx && idx <= hi)
    }

    pub fn label(&self, tokens: &[Token]) -> Option<(String, String)> {
        let (lo, hi) = self.range()?;
        selection_label(tokens, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{GlobalDictionary, Layered, LocalOverrides};
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    fn bank_dict() -> GlobalDictionary {
        GlobalDictionary::from_entries([("bank", "kıyı"), ("bank hesabı", "banka hesabı")])
    }

    fn labels(matches: &[PhraseMatch]) -> Vec<(&str, &str)> {
        matches
            .iter()
            .map(|m| (m.label.as_str(), m.meaning.as_str()))
            .collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let tokens = tokenize("bank hesabı açtım");
        let best = best_phrase_from(&tokens, 0, &bank_dict(), MAX_PHRASE_SPAN).unwrap();
        assert_eq!(best.label, "bank hesabı");
        assert_eq!(best.meaning, "banka hesabı");
        assert_eq!((best.start, best.end), (0, 2));
    }

    #[test]
    fn test_best_phrase_single_word() {
        let tokens = tokenize("bank kapalı");
        let best = best_phrase_from(&tokens, 0, &bank_dict(), MAX_PHRASE_SPAN).unwrap();
        assert_eq!(best.key, "bank");
        assert_eq!(best.end, 0);
    }

    #[test]
    fn test_best_phrase_from_separator_is_none() {
        let tokens = tokenize("bank hesabı");
        assert_eq!(best_phrase_from(&tokens, 1, &bank_dict(), MAX_PHRASE_SPAN), None);
        assert_eq!(best_phrase_from(&tokens, 99, &bank_dict(), MAX_PHRASE_SPAN), None);
    }

    #[test]
    fn test_best_phrase_respects_max_span() {
        let dict = GlobalDictionary::from_entries([
            ("a b c d e", "five"),
            ("a b c d e f", "six"),
        ]);
        let tokens = tokenize("a b c d e f");
        let best = best_phrase_from(&tokens, 0, &dict, MAX_PHRASE_SPAN).unwrap();
        assert_eq!(best.meaning, "five");
    }

    #[test]
    fn test_best_phrase_honours_shorter_span() {
        let dict = GlobalDictionary::from_entries([("a", "one"), ("a b c", "three")]);
        let tokens = tokenize("a b c d");
        let best = best_phrase_from(&tokens, 0, &dict, 2).unwrap();
        assert_eq!(best.meaning, "one");
        let best = best_phrase_from(&tokens, 0, &dict, 3).unwrap();
        assert_eq!((best.meaning.as_str(), best.end), ("three", 4));
        assert_eq!(best_phrase_from(&tokens, 0, &dict, 0), None);
    }

    #[test]
    fn test_best_phrase_is_case_insensitive() {
        let tokens = tokenize("BANK Hesabı");
        let best = best_phrase_from(&tokens, 0, &bank_dict(), MAX_PHRASE_SPAN).unwrap();
        assert_eq!(best.label, "BANK Hesabı");
        assert_eq!(best.key, "bank hesabı");
    }

    #[test]
    fn test_covering_from_phrase_tail() {
        let tokens = tokenize("bank hesabı açtım");
        let found = meanings_covering(&tokens, 2, &bank_dict(), MAX_PHRASE_SPAN);
        assert_eq!(labels(&found), vec![("bank hesabı", "banka hesabı")]);
    }

    #[test]
    fn test_covering_from_phrase_head() {
        let tokens = tokenize("bank hesabı açtım");
        let found = meanings_covering(&tokens, 0, &bank_dict(), MAX_PHRASE_SPAN);
        assert_eq!(
            labels(&found),
            vec![("bank", "kıyı"), ("bank hesabı", "banka hesabı")]
        );
    }

    #[test]
    fn test_covering_orders_by_start_then_length() {
        let dict = GlobalDictionary::from_entries([
            ("c", "single"),
            ("b c", "bc"),
            ("a b c", "abc"),
            ("c d", "cd"),
            ("b c d", "bcd"),
        ]);
        let tokens = tokenize("a b c d");
        let found = meanings_covering(&tokens, 4, &dict, MAX_PHRASE_SPAN);
        assert_eq!(
            labels(&found),
            vec![
                ("c", "single"),
                ("a b c", "abc"),
                ("b c", "bc"),
                ("b c d", "bcd"),
                ("c d", "cd"),
            ]
        );
    }

    #[test]
    fn test_covering_deduplicates_keys() {
        let dict = GlobalDictionary::from_entries([("sehr", "çok"), ("sehr sehr", "çok çok")]);
        let tokens = tokenize("sehr sehr sehr");
        let found = meanings_covering(&tokens, 2, &dict, MAX_PHRASE_SPAN);
        assert_eq!(
            labels(&found),
            vec![("sehr", "çok"), ("sehr sehr", "çok çok")]
        );
        assert_eq!((found[1].start, found[1].end), (0, 2));
    }

    #[test]
    fn test_covering_on_separator_is_empty() {
        let tokens = tokenize("bank hesabı");
        assert!(meanings_covering(&tokens, 1, &bank_dict(), MAX_PHRASE_SPAN).is_empty());
    }

    #[test]
    fn test_covering_with_empty_dictionary() {
        let tokens = tokenize("bank hesabı");
        let dict = GlobalDictionary::new();
        assert!(meanings_covering(&tokens, 0, &dict, MAX_PHRASE_SPAN).is_empty());
        assert_eq!(best_phrase_from(&tokens, 0, &dict, MAX_PHRASE_SPAN), None);
    }

    #[test]
    fn test_covering_uses_local_precedence() {
        let global = bank_dict();
        let mut local = LocalOverrides::new();
        local.clear("bank");
        let view = Layered::new(&local, &global);
        let tokens = tokenize("bank hesabı");
        let found = meanings_covering(&tokens, 0, &view, MAX_PHRASE_SPAN);
        assert_eq!(labels(&found), vec![("bank hesabı", "banka hesabı")]);
    }

    #[test]
    fn test_phrase_stops_at_sentence_end() {
        let dict = GlobalDictionary::from_entries([("gut", "iyi")]);
        let tokens = tokenize("gut.");
        let best = best_phrase_from(&tokens, 0, &dict, MAX_PHRASE_SPAN).unwrap();
        assert_eq!(best.end, 0);
    }

    #[test]
    fn test_selection_label_joins_words() {
        let tokens = tokenize("Ich habe, ein Konto");
        assert_eq!(
            selection_label(&tokens, 6, 2),
            Some(("habe ein Konto".to_string(), "habe ein konto".to_string()))
        );
        assert_eq!(selection_label(&tokens, 1, 1), None);
    }

    #[test]
    fn test_selection_taps() {
        let tokens = tokenize("eins zwei drei");
        let mut sel = PhraseSelection::new();
        sel.tap(&tokens, 1);
        assert_eq!(sel.range(), None);

        sel.tap(&tokens, 0);
        assert_eq!(sel.range(), Some((0, 0)));
        sel.tap(&tokens, 4);
        assert_eq!(sel.range(), Some((0, 4)));
        assert!(sel.contains(2));
        assert_eq!(sel.label(&tokens).map(|(l, _)| l), Some("eins zwei drei".to_string()));

        sel.tap(&tokens, 2);
        assert_eq!(sel.range(), Some((2, 2)));
        sel.clear();
        assert_eq!(sel.label(&tokens), None);
    }
}
