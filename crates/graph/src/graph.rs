use crate::error::{GraphError, Result};
use crate::types::{ItemNode, ResonanceEdge, ResonanceGraph};
use petgraph::visit::EdgeRef;
use resonance_encoding::Value;
use std::collections::BTreeSet;

/// One edge with its endpoint texts resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub edge: &'a ResonanceEdge,
}

impl EdgeView<'_> {
    pub fn touches(&self, text: &str) -> bool {
        self.source == text || self.target == text
    }
}

impl ResonanceGraph {
    /// Every edge in insertion order (layer-then-value, pair order within a group).
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(move |e| EdgeView {
            source: &self.graph[e.source()].text,
            target: &self.graph[e.target()].text,
            edge: e.weight(),
        })
    }

    pub fn edges_in_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = EdgeView<'a>> {
        self.edges().filter(move |e| e.edge.layer == layer)
    }

    /// Edges generated for one `(layer, value)` group.
    pub fn edge_count_for(&self, layer: &str, value: &Value) -> usize {
        self.edges_in_layer(layer)
            .filter(|e| &e.edge.value == value)
            .count()
    }

    /// Direct neighbors of `text` through edges in any of `layers`, sorted.
    /// Unknown items have no neighbors.
    pub fn neighbors<S: AsRef<str>>(&self, text: &str, layers: &[S]) -> BTreeSet<&str> {
        let Some(idx) = self.find_node(text) else {
            return BTreeSet::new();
        };
        self.graph
            .edges(idx)
            .filter(|e| layers.iter().any(|l| l.as_ref() == e.weight().layer))
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                self.graph[other].text.as_str()
            })
            .filter(|other| *other != text)
            .collect()
    }

    /// Items that take part in at least one resonance group in any of `layers`.
    pub fn participants<S: AsRef<str>>(&self, layers: &[S]) -> BTreeSet<&str> {
        self.edges()
            .filter(|e| layers.iter().any(|l| l.as_ref() == e.edge.layer))
            .flat_map(|e| [e.source, e.target])
            .collect()
    }

    /// Distinct `(layer, value)` pairs that `text` shares with other items.
    pub fn resonances_of(&self, text: &str) -> Vec<(&str, &Value)> {
        let Some(idx) = self.find_node(text) else {
            return Vec::new();
        };
        let mut seen: Vec<(&str, &Value)> = Vec::new();
        for e in self.graph.edges(idx) {
            let key = (e.weight().layer.as_str(), &e.weight().value);
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen
    }

    pub fn ensure_layers<S: AsRef<str>>(&self, layers: &[S]) -> Result<()> {
        match layers.iter().find(|l| !self.has_layer(l.as_ref())) {
            Some(unknown) => Err(GraphError::UnknownLayer(unknown.as_ref().to_string())),
            None => Ok(()),
        }
    }

    pub fn origins(&self) -> BTreeSet<&str> {
        self.nodes()
            .flat_map(|node: &ItemNode| node.origins.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemNode;
    use pretty_assertions::assert_eq;

    fn node(text: &str) -> ItemNode {
        ItemNode {
            text: text.to_string(),
            origins: BTreeSet::from(["t".to_string()]),
            values: Vec::new(),
        }
    }

    fn edge(layer: &str, value: i64) -> ResonanceEdge {
        ResonanceEdge {
            layer: layer.to_string(),
            value: Value::Int(value),
        }
    }

    fn sample() -> ResonanceGraph {
        let mut graph = ResonanceGraph::new(vec!["A".into(), "B".into()]);
        let beans = graph.add_node(node("Beans"));
        let snaeb = graph.add_node(node("Snaeb"));
        let dream = graph.add_node(node("Dream"));
        graph.add_node(node("Lonely"));
        graph.add_edge(beans, snaeb, edge("A", 48));
        graph.add_edge(beans, snaeb, edge("B", 7));
        graph.add_edge(beans, dream, edge("B", 7));
        graph.add_edge(snaeb, dream, edge("B", 7));
        graph
    }

    #[test]
    fn neighbors_respect_layer_selection() {
        let graph = sample();
        assert_eq!(
            graph.neighbors("Beans", &["A"]).into_iter().collect::<Vec<_>>(),
            vec!["Snaeb"]
        );
        assert_eq!(
            graph.neighbors("Beans", &["A", "B"]).into_iter().collect::<Vec<_>>(),
            vec!["Dream", "Snaeb"]
        );
        assert!(graph.neighbors("Lonely", &["A", "B"]).is_empty());
        assert!(graph.neighbors("Missing", &["A"]).is_empty());
    }

    #[test]
    fn parallel_edges_are_kept_per_layer() {
        let graph = sample();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edges_in_layer("A").count(), 1);
        assert_eq!(graph.edge_count_for("B", &Value::Int(7)), 3);
        assert_eq!(graph.resonances_of("Beans").len(), 2);
    }

    #[test]
    fn ensure_layers_names_the_unknown_one() {
        let graph = sample();
        assert!(graph.ensure_layers(&["A", "B"]).is_ok());
        assert_eq!(
            graph.ensure_layers(&["A", "Zeta"]),
            Err(GraphError::UnknownLayer("Zeta".into()))
        );
    }
}
