use crate::error::{GraphError, Result};
use crate::types::{ItemNode, ResonanceEdge, ResonanceGraph};
use resonance_indexer::{Item, LayerIndexSet, ResonanceGroup, ResonanceIndex};
use std::collections::HashMap;

/// Groups above this size get a warning: edge generation is quadratic.
pub const DEFAULT_LARGE_GROUP_WARN: usize = 64;

/// Build resonance graph from items and their groups
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    large_group_warn: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            large_group_warn: DEFAULT_LARGE_GROUP_WARN,
        }
    }

    pub fn with_large_group_warn(mut self, size: usize) -> Self {
        self.large_group_warn = size;
        self
    }

    /// Build graph from a registry snapshot and its index.
    pub fn build<'a>(
        &self,
        items: impl IntoIterator<Item = &'a Item>,
        index: &ResonanceIndex,
    ) -> Result<ResonanceGraph> {
        self.build_from_parts(items, index.layers(), index.groups())
    }

    pub fn build_from_parts<'a>(
        &self,
        items: impl IntoIterator<Item = &'a Item>,
        layers: &LayerIndexSet,
        groups: &[ResonanceGroup],
    ) -> Result<ResonanceGraph> {
        let mut graph = ResonanceGraph::new(layers.layer_names().map(String::from).collect());

        // Phase 1: one node per item, including isolated ones
        let mut values: HashMap<&str, Vec<(String, resonance_encoding::Value)>> = HashMap::new();
        for layer in layers.iter() {
            for (value, texts) in layer.buckets() {
                for text in texts {
                    values
                        .entry(text.as_str())
                        .or_default()
                        .push((layer.layer().to_string(), value.clone()));
                }
            }
        }

        for item in items {
            let node = ItemNode {
                text: item.text().to_string(),
                origins: item.origins().clone(),
                values: values.remove(item.text()).unwrap_or_default(),
            };
            graph.add_node(node);
        }

        // Phase 2: one edge per unordered pair within each group
        for group in groups {
            if group.len() > self.large_group_warn {
                log::warn!(
                    "Large resonance group {}={} with {} items generates {} edges",
                    group.layer,
                    group.value,
                    group.len(),
                    group.pair_count()
                );
            }

            let members = group
                .items
                .iter()
                .map(|text| {
                    graph.find_node(text).ok_or_else(|| {
                        GraphError::InvariantViolation(format!(
                            "group {}={} references unregistered item {text:?}",
                            group.layer, group.value
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    graph.add_edge(
                        a,
                        b,
                        ResonanceEdge {
                            layer: group.layer.clone(),
                            value: group.value.clone(),
                        },
                    );
                }
            }
        }

        log::info!(
            "Built resonance graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the graph with default settings.
pub fn build_graph<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    index: &ResonanceIndex,
) -> Result<ResonanceGraph> {
    GraphBuilder::new().build(items, index)
}
