//! Symbol mapping model: draft validation, list transforms and text expansion
//!
//! The mapping list itself lives in the settings store. Everything here is a
//! pure function over a borrowed list so the editor can build whole-list
//! replacements without keeping a copy of its own.

use crate::constants::{MAX_PHRASE_LEN, MAX_SYMBOL_LEN};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A phrase and the symbol it expands to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMapping {
    pub phrase: String,
    pub symbol: String,
}

impl SymbolMapping {
    pub fn new(phrase: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            symbol: symbol.into(),
        }
    }

    /// Chip label, e.g. `arrow → →`
    pub fn label(&self) -> String {
        format!("{} → {}", self.phrase, self.symbol)
    }
}

/// Why a draft was not accepted. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("phrase is empty")]
    EmptyPhrase,
    #[error("symbol is empty")]
    EmptySymbol,
    #[error("phrase is {len} chars, limit is {}", MAX_PHRASE_LEN)]
    PhraseTooLong { len: usize },
    #[error("symbol is {len} chars, limit is {}", MAX_SYMBOL_LEN)]
    SymbolTooLong { len: usize },
    #[error("phrase '{0}' is already mapped")]
    DuplicatePhrase(String),
}

/// Trim and length-check a draft without looking at the existing list.
///
/// This is the check that drives the add button; duplicates are only caught
/// by [`prepare_add`].
pub fn validate_draft(phrase: &str, symbol: &str) -> Result<SymbolMapping, Rejection> {
    let phrase = phrase.trim();
    let symbol = symbol.trim();

    if phrase.is_empty() {
        return Err(Rejection::EmptyPhrase);
    }
    if symbol.is_empty() {
        return Err(Rejection::EmptySymbol);
    }

    let phrase_len = phrase.chars().count();
    if phrase_len > MAX_PHRASE_LEN {
        return Err(Rejection::PhraseTooLong { len: phrase_len });
    }
    let symbol_len = symbol.chars().count();
    if symbol_len > MAX_SYMBOL_LEN {
        return Err(Rejection::SymbolTooLong { len: symbol_len });
    }

    Ok(SymbolMapping::new(phrase.to_lowercase(), symbol))
}

/// Full add-time validation: draft checks plus case-insensitive uniqueness.
pub fn prepare_add(
    existing: &[SymbolMapping],
    phrase: &str,
    symbol: &str,
) -> Result<SymbolMapping, Rejection> {
    let mapping = validate_draft(phrase, symbol)?;
    // Both sides lower-cased: entries written by older builds or by hand may
    // not be normalized.
    if existing
        .iter()
        .any(|m| m.phrase.to_lowercase() == mapping.phrase)
    {
        return Err(Rejection::DuplicatePhrase(mapping.phrase));
    }
    Ok(mapping)
}

/// New list with `mapping` appended
pub fn with_added(existing: &[SymbolMapping], mapping: SymbolMapping) -> Vec<SymbolMapping> {
    let mut list = Vec::with_capacity(existing.len() + 1);
    list.extend_from_slice(existing);
    list.push(mapping);
    list
}

/// New list without the entry whose phrase equals `phrase` exactly, order kept
pub fn without_phrase(existing: &[SymbolMapping], phrase: &str) -> Vec<SymbolMapping> {
    existing
        .iter()
        .filter(|m| m.phrase != phrase)
        .cloned()
        .collect()
}

/// Replace every whole-word, case-insensitive occurrence of a mapped phrase
/// with its symbol. Longer phrases win at the same position.
pub fn expand(text: &str, mappings: &[SymbolMapping]) -> String {
    let mut ordered: Vec<&SymbolMapping> =
        mappings.iter().filter(|m| !m.phrase.is_empty()).collect();
    ordered.sort_by_key(|m| Reverse(m.phrase.chars().count()));

    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let hit = if prev.is_some_and(char::is_alphanumeric) {
            None
        } else {
            ordered
                .iter()
                .find_map(|m| match_len(rest, &m.phrase).map(|len| (*m, len)))
        };

        match hit {
            Some((mapping, len)) => {
                out.push_str(&mapping.symbol);
                prev = rest[..len].chars().next_back();
                rest = &rest[len..];
            }
            None => {
                out.push(c);
                prev = Some(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Byte length of the match of `phrase` at the start of `haystack`, if the
/// match ends on a word boundary.
fn match_len(haystack: &str, phrase: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for p in phrase.chars() {
        let (_, h) = chars.next()?;
        if !h.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    let end = chars.next().map_or(haystack.len(), |(i, _)| i);
    let runs_on = haystack[end..]
        .chars()
        .next()
        .is_some_and(char::is_alphanumeric);
    (!runs_on).then_some(end)
}
