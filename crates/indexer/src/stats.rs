use serde::{Deserialize, Serialize};

/// Statistics about one full index build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of items indexed
    pub items: usize,

    /// Number of layers built
    pub layers: usize,

    /// Distinct values across all layers
    pub buckets: usize,

    /// Resonance groups (buckets with two or more items)
    pub groups: usize,

    /// Size of the largest resonance group
    pub largest_group: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Groups per layer
    pub groups_by_layer: std::collections::BTreeMap<String, usize>,
}

impl IndexStats {
    pub fn new(items: usize) -> Self {
        Self {
            items,
            layers: 0,
            buckets: 0,
            groups: 0,
            largest_group: 0,
            time_ms: 0,
            groups_by_layer: std::collections::BTreeMap::new(),
        }
    }

    pub fn add_layer(&mut self, layer: &str, buckets: usize) {
        self.layers += 1;
        self.buckets += buckets;
        self.groups_by_layer.entry(layer.to_string()).or_insert(0);
    }

    pub fn add_group(&mut self, layer: &str, size: usize) {
        self.groups += 1;
        self.largest_group = self.largest_group.max(size);
        *self.groups_by_layer.entry(layer.to_string()).or_insert(0) += 1;
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new(0)
    }
}
