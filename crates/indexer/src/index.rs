use crate::layer_index::LayerIndexSet;
use crate::registry::ItemRegistry;
use crate::resonance::{extract_all, ResonanceGroup};
use crate::stats::IndexStats;
use resonance_encoding::EncodingRegistry;
use std::time::Instant;

/// Layer indices and resonance groups derived from one registry state.
///
/// Always rebuilt in full; it never observes a half-updated registry.
#[derive(Debug, Clone, Default)]
pub struct ResonanceIndex {
    layers: LayerIndexSet,
    groups: Vec<ResonanceGroup>,
    stats: IndexStats,
}

impl ResonanceIndex {
    pub fn build(registry: &ItemRegistry, encodings: &EncodingRegistry) -> Self {
        let start = Instant::now();
        let mut stats = IndexStats::new(registry.len());

        let layers = LayerIndexSet::build(registry, encodings);
        for index in layers.iter() {
            stats.add_layer(index.layer(), index.len());
        }

        let groups = extract_all(&layers);
        for group in &groups {
            stats.add_group(&group.layer, group.len());
        }

        stats.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Indexed {} items across {} layers: {} groups (largest {}) in {} ms",
            stats.items,
            stats.layers,
            stats.groups,
            stats.largest_group,
            stats.time_ms
        );

        Self {
            layers,
            groups,
            stats,
        }
    }

    pub fn layers(&self) -> &LayerIndexSet {
        &self.layers
    }

    /// All groups, layer-then-value order.
    pub fn groups(&self) -> &[ResonanceGroup] {
        &self.groups
    }

    pub fn groups_in<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a ResonanceGroup> {
        self.groups.iter().filter(move |group| group.layer == layer)
    }

    /// Groups that include `text`, for any layer.
    pub fn groups_containing<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = &'a ResonanceGroup> {
        self.groups.iter().filter(move |group| group.contains(text))
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }
}
