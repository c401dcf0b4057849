use crate::error::{IndexerError, Result};
use crate::item::{canonicalize, identity, Item};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Result of a negative-feedback removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOutcome {
    Removed,
    /// The item carries at least one protected origin and was kept.
    Protected,
    Absent,
}

/// Canonical set of known items, in insertion order.
///
/// At most one item exists per case-insensitive identity. Repeat additions
/// merge their origin into the existing item.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    positions: HashMap<String, usize>,
    protected_origins: BTreeSet<String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_protected_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protected_origins: origins.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add `text` under `origin`. Returns the stored item and whether it was
    /// newly created. Invalid text leaves the registry untouched.
    pub fn add(&mut self, text: &str, origin: &str) -> Result<(&Item, bool)> {
        let canonical = canonicalize(text)?;
        let origin = origin.trim();
        if origin.is_empty() {
            return Err(IndexerError::validation(text, "origin must not be empty"));
        }

        if let Some(&pos) = self.positions.get(&canonical.key) {
            let item = &mut self.items[pos];
            if item.merge_origin(origin.to_string()) {
                log::debug!("Merged origin {origin} into {}", item.text());
            }
            return Ok((&self.items[pos], false));
        }

        let pos = self.items.len();
        self.positions.insert(canonical.key.clone(), pos);
        self.items.push(Item::new(canonical, origin.to_string()));
        Ok((&self.items[pos], true))
    }

    /// Delete the item if present, regardless of its origins.
    pub fn remove(&mut self, text: &str) -> bool {
        let Some(pos) = identity(text).and_then(|key| self.positions.get(&key).copied()) else {
            return false;
        };
        self.items.remove(pos);
        self.reindex_positions();
        true
    }

    /// Negative-feedback removal: refused while any origin is protected.
    pub fn reject(&mut self, text: &str) -> RemovalOutcome {
        let protected = match self.get(text) {
            None => return RemovalOutcome::Absent,
            Some(item) => self.is_protected(item),
        };
        if protected {
            return RemovalOutcome::Protected;
        }
        self.remove(text);
        RemovalOutcome::Removed
    }

    pub fn is_protected(&self, item: &Item) -> bool {
        item.origins().iter().any(|o| self.protected_origins.contains(o))
    }

    pub fn protected_origins(&self) -> &BTreeSet<String> {
        &self.protected_origins
    }

    pub fn get(&self, text: &str) -> Option<&Item> {
        let key = identity(text)?;
        self.positions.get(&key).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.get(text).is_some()
    }

    pub fn origins(&self, text: &str) -> Option<&BTreeSet<String>> {
        self.get(text).map(Item::origins)
    }

    /// All items, insertion order.
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every distinct origin across the registry, sorted.
    pub fn all_origins(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .flat_map(|item| item.origins().iter().map(String::as_str))
            .collect()
    }

    fn reindex_positions(&mut self) {
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.key().to_string(), pos))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MANUAL_ORIGIN;
    use pretty_assertions::assert_eq;

    #[test]
    fn repeat_add_merges_origins() {
        let mut registry = ItemRegistry::new();
        let (_, created) = registry.add("Love", "fileA").unwrap();
        assert!(created);
        let (item, created) = registry.add("love", "fileB").unwrap();
        assert!(!created);
        assert_eq!(item.text(), "Love");

        assert_eq!(registry.len(), 1);
        let origins: Vec<_> = registry.origins("LOVE").unwrap().iter().cloned().collect();
        assert_eq!(origins, vec!["fileA".to_string(), "fileB".to_string()]);
    }

    #[test]
    fn invalid_text_does_not_mutate() {
        let mut registry = ItemRegistry::new();
        registry.add("Beans", "a").unwrap();
        assert!(registry.add("Beans2", "a").is_err());
        assert!(registry.add("Beans", "  ").is_err());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.origins("beans").unwrap().len(), 1);
    }

    #[test]
    fn remove_keeps_insertion_order_and_lookups() {
        let mut registry = ItemRegistry::new();
        for word in ["Angel", "Beans", "Chaos"] {
            registry.add(word, "seed").unwrap();
        }
        assert!(registry.remove("beans"));
        assert!(!registry.remove("beans"));
        assert!(!registry.remove("not valid 1"));

        let texts: Vec<_> = registry.iter().map(Item::text).collect();
        assert_eq!(texts, vec!["Angel", "Chaos"]);
        assert_eq!(registry.get("chaos").map(Item::text), Some("Chaos"));
    }

    #[test]
    fn reject_respects_protected_origins() {
        let mut registry = ItemRegistry::with_protected_origins([MANUAL_ORIGIN]);
        registry.add("Hope", MANUAL_ORIGIN).unwrap();
        registry.add("Fear", "_USER_FEEDBACK_").unwrap();
        registry.add("Fear", "notes.md").unwrap();

        assert_eq!(registry.reject("hope"), RemovalOutcome::Protected);
        assert_eq!(registry.reject("fear"), RemovalOutcome::Removed);
        assert_eq!(registry.reject("fear"), RemovalOutcome::Absent);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn all_origins_is_sorted_and_distinct() {
        let mut registry = ItemRegistry::new();
        registry.add("Light", "b.md").unwrap();
        registry.add("Shadow", "a.md").unwrap();
        registry.add("Shadow", "b.md").unwrap();
        assert_eq!(registry.all_origins().into_iter().collect::<Vec<_>>(), vec!["a.md", "b.md"]);
    }
}
