use crate::error::{IndexerError, Result};
use crate::item::Item;
use crate::registry::ItemRegistry;
use resonance_encoding::{Encoding, EncodingRegistry, Value};
use std::collections::{BTreeMap, HashSet};

/// `value -> items` for one encoding.
///
/// Items inside a bucket keep registry order. Every registered item sits in
/// exactly one bucket, including items whose value is not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerIndex {
    layer: String,
    buckets: BTreeMap<Value, Vec<String>>,
}

impl LayerIndex {
    pub fn build<'a>(items: impl IntoIterator<Item = &'a Item>, encoding: &Encoding) -> Self {
        let mut buckets: BTreeMap<Value, Vec<String>> = BTreeMap::new();
        for item in items {
            buckets
                .entry(encoding.evaluate(item.text()))
                .or_default()
                .push(item.text().to_string());
        }
        Self {
            layer: encoding.name().to_string(),
            buckets,
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Buckets in natural value order.
    pub fn buckets(&self) -> impl Iterator<Item = (&Value, &[String])> {
        self.buckets.iter().map(|(v, items)| (v, items.as_slice()))
    }

    pub fn items_with(&self, value: &Value) -> &[String] {
        self.buckets.get(value).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when the buckets hold every registry item exactly once and nothing else.
    pub fn is_partition_of(&self, registry: &ItemRegistry) -> bool {
        let mut seen = HashSet::new();
        for items in self.buckets.values() {
            for text in items {
                if !seen.insert(text.as_str()) || !registry.contains(text) {
                    return false;
                }
            }
        }
        seen.len() == registry.len()
    }
}

/// One [`LayerIndex`] per encoding, in encoding registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerIndexSet {
    layers: Vec<LayerIndex>,
}

impl LayerIndexSet {
    pub fn build(registry: &ItemRegistry, encodings: &EncodingRegistry) -> Self {
        let layers = encodings
            .iter()
            .map(|encoding| {
                let index = LayerIndex::build(registry.iter(), encoding);
                log::debug!(
                    "Indexed layer {}: {} items into {} values",
                    index.layer(),
                    index.item_count(),
                    index.len()
                );
                index
            })
            .collect();
        Self { layers }
    }

    pub fn get(&self, layer: &str) -> Result<&LayerIndex> {
        self.layers
            .iter()
            .find(|index| index.layer() == layer)
            .ok_or_else(|| IndexerError::UnknownLayer(layer.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerIndex> {
        self.layers.iter()
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(LayerIndex::layer)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
