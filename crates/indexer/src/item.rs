use crate::error::{IndexerError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Letters, single spaces between words. Applied after whitespace collapse.
static ITEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Alphabetic}+(?: \p{Alphabetic}+)*$").expect("valid item pattern"));

/// Origin recorded for items typed in by hand.
pub const MANUAL_ORIGIN: &str = "_MANUAL_";
/// Origin recorded for items pulled in by a search lookup.
pub const SEARCH_ORIGIN: &str = "_SEARCH_";
/// Origin recorded for bulk word-list imports.
pub const IMPORTED_LIST_ORIGIN: &str = "_MANUAL_/_IMPORTED_LIST_";

/// A known word or phrase.
///
/// `text` is the title-cased display form and doubles as the item's identity
/// in every derived structure; `key` is its lowercase lookup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    key: String,
    text: String,
    origins: BTreeSet<String>,
}

impl Item {
    pub(crate) fn new(canonical: Canonical, origin: String) -> Self {
        Self {
            key: canonical.key,
            text: canonical.text,
            origins: BTreeSet::from([origin]),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origins(&self) -> &BTreeSet<String> {
        &self.origins
    }

    pub(crate) fn merge_origin(&mut self, origin: String) -> bool {
        self.origins.insert(origin)
    }
}

/// Normalized form of candidate text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub key: String,
    pub text: String,
}

/// Trim, collapse inner whitespace and check the letters/spaces pattern.
pub fn canonicalize(raw: &str) -> Result<Canonical> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(IndexerError::validation(raw, "empty text"));
    }
    if !ITEM_PATTERN.is_match(&collapsed) {
        return Err(IndexerError::validation(raw, "only letters and spaces are allowed"));
    }
    let key = collapsed.to_lowercase();
    let text = title_case(&key);
    Ok(Canonical { key, text })
}

/// Lowercase lookup key for `raw`, if it is valid item text.
pub fn identity(raw: &str) -> Option<String> {
    canonicalize(raw).ok().map(|c| c.key)
}

fn title_case(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut upper = first.to_uppercase();
                    let head = match (upper.next(), upper.next()) {
                        (Some(single), None) => single,
                        _ => first,
                    };
                    std::iter::once(head).chain(chars).collect::<String>()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
