use petgraph::graph::{NodeIndex, UnGraph};
use resonance_encoding::Value;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Node in the resonance graph: one registered item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemNode {
    /// Display text (item identity)
    pub text: String,

    /// Provenance tags
    pub origins: BTreeSet<String>,

    /// Value under every indexed layer, in layer order
    pub values: Vec<(String, Value)>,
}

impl ItemNode {
    pub fn value_in(&self, layer: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == layer)
            .map(|(_, value)| value)
    }

    /// True when any layer evaluates to exactly `target`.
    pub fn has_value(&self, target: f64) -> bool {
        self.values.iter().any(|(_, value)| value.equals_number(target))
    }
}

/// Edge in the resonance graph: the two endpoints share `value` under `layer`.
///
/// Item pairs that resonate in several layers carry one edge per layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResonanceEdge {
    pub layer: String,
    pub value: Value,
}

/// Multi-layer resonance graph
pub struct ResonanceGraph {
    /// Undirected multigraph (item -- item per shared layer value)
    pub graph: UnGraph<ItemNode, ResonanceEdge>,

    /// Item text -> NodeIndex mapping for fast lookup
    pub node_index: HashMap<String, NodeIndex>,

    /// Indexed layers, registration order
    pub layers: Vec<String>,
}

impl ResonanceGraph {
    pub fn new(layers: Vec<String>) -> Self {
        Self {
            graph: UnGraph::default(),
            node_index: HashMap::new(),
            layers,
        }
    }

    /// Add node to graph
    pub fn add_node(&mut self, node: ItemNode) -> NodeIndex {
        let text = node.text.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(text, idx);
        idx
    }

    /// Add edge between nodes
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: ResonanceEdge) {
        self.graph.add_edge(a, b, edge);
    }

    /// Find node by item text
    pub fn find_node(&self, text: &str) -> Option<NodeIndex> {
        self.node_index.get(text).copied()
    }

    pub fn node(&self, text: &str) -> Option<&ItemNode> {
        self.find_node(text).and_then(|idx| self.graph.node_weight(idx))
    }

    /// All nodes, insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ItemNode> {
        self.graph.node_weights()
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layers.iter().any(|name| name == layer)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for ResonanceGraph {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
