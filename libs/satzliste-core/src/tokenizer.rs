//! Lossless word/separator segmentation.
//!
//! A word is a maximal run of Unicode letters or numbers; everything else
//! (whitespace, punctuation, symbols) forms separator runs. Leading and
//! trailing separators are kept so the sentence can be rebuilt exactly.

use crate::dictionary::fold;
use crate::types::{Token, TokenKind};
use std::collections::HashSet;

/// Whether a code point belongs to a word run.
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Split text into alternating word and separator runs.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;

    for (offset, c) in text.char_indices() {
        let kind = if is_word_char(c) {
            TokenKind::Word
        } else {
            TokenKind::Separator
        };

        match run_kind {
            Some(current) if current == kind => {}
            Some(current) => {
                push_run(&mut tokens, current, &text[run_start..offset]);
                run_start = offset;
                run_kind = Some(kind);
            }
            None => run_kind = Some(kind),
        }
    }

    if let Some(kind) = run_kind {
        push_run(&mut tokens, kind, &text[run_start..]);
    }

    tokens
}

fn push_run(tokens: &mut Vec<Token>, kind: TokenKind, text: &str) {
    let position = tokens.len();
    tokens.push(Token {
        kind,
        text: text.to_string(),
        position,
    });
}

/// Whitespace-separated words with leading/trailing non-word characters
/// stripped. Empty results are dropped.
pub fn words_only(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !is_word_char(c)))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct words of a sentence as `(key, label)`, keeping the first
/// spelling seen for each key.
pub fn unique_words(text: &str) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    words_only(text)
        .into_iter()
        .filter_map(|label| {
            let key = fold(&label);
            seen.insert(key.clone()).then_some((key, label))
        })
        .collect()
}
