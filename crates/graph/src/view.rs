use crate::color::{Color, GOLD, WHITE};
use crate::error::Result;
use crate::layout::{Layout, Position};
use crate::types::ResonanceGraph;
use resonance_encoding::predicates::is_prime;
use resonance_encoding::{Value, BINARY_SUM};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const FADE_OPACITY: f64 = 0.15;
pub const NODE_SIZE: u32 = 10;
pub const HIGHLIGHT_NODE_SIZE: u32 = 20;
pub const EDGE_WIDTH: u32 = 3;
pub const PRIME_EDGE_WIDTH: u32 = 5;
pub const HIGHLIGHT_EDGE_WIDTH: u32 = 7;

/// Query state owned by the render sink. Every filter is optional; an
/// omitted filter does not narrow anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewState {
    /// Edge layers to show. `None` selects every indexed layer.
    pub layers: Option<Vec<String>>,
    pub highlight: Option<String>,
    /// Keep these items and their direct neighbors.
    pub words: Vec<String>,
    /// Keep items with at least one of these origins.
    pub origins: Vec<String>,
    /// Keep items that resonate in at least one of these layers.
    pub node_layers: Vec<String>,
    /// Keep items with this exact value under any layer.
    pub value: Option<f64>,
    /// Keep only edges with this value, for edges in `connection_layers`.
    pub connection_value: Option<f64>,
    pub connection_layers: Vec<String>,
    pub hide_all_edges: bool,
    pub prime_only: bool,
    pub fade_unconnected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    Highlight,
    Prime,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleNode {
    pub text: String,
    pub position: Position,
    pub color: Color,
    pub size: u32,
    pub opacity: f64,
    pub highlighted: bool,
    pub faded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleEdge {
    pub source: String,
    pub target: String,
    pub layer: String,
    pub value: Value,
    pub style: EdgeStyle,
    pub width: u32,
    pub color: Color,
}

/// Render-ready subset of the graph for one [`ViewState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibleView {
    pub nodes: Vec<VisibleNode>,
    pub edges: Vec<VisibleEdge>,
    /// Set when the query could not be answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VisibleView {
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn node_texts(&self) -> BTreeSet<&str> {
        self.nodes.iter().map(|n| n.text.as_str()).collect()
    }
}

/// Read-only inputs of the view filter.
pub struct ViewFilter<'a> {
    pub graph: &'a ResonanceGraph,
    pub layout: &'a Layout,
    pub node_colors: &'a BTreeMap<String, Color>,
    pub layer_colors: &'a BTreeMap<String, Color>,
}

impl<'a> ViewFilter<'a> {
    /// Narrow the graph to the nodes and edges `state` selects.
    ///
    /// Fails with `UnknownLayer` if any layer name in `state` is not indexed.
    pub fn apply(&self, state: &ViewState) -> Result<VisibleView> {
        let graph = self.graph;
        // First occurrence wins so a repeated layer name does not repeat edges.
        let mut seen = HashSet::new();
        let selected: Vec<&str> = match &state.layers {
            Some(layers) => layers.iter().map(String::as_str).collect::<Vec<_>>(),
            None => graph.layers.iter().map(String::as_str).collect(),
        }
        .into_iter()
        .filter(|layer| seen.insert(*layer))
        .collect();
        graph.ensure_layers(&selected)?;
        graph.ensure_layers(&state.node_layers)?;
        graph.ensure_layers(&state.connection_layers)?;

        let highlight = state.highlight.as_deref().map(display_form);
        let mut visible: BTreeSet<&str> = graph.nodes().map(|n| n.text.as_str()).collect();

        if !state.words.is_empty() {
            let words: Vec<String> = state.words.iter().map(|w| display_form(w)).collect();
            let mut keep: HashSet<&str> = HashSet::new();
            for word in &words {
                if let Some(node) = graph.node(word) {
                    keep.insert(node.text.as_str());
                }
                keep.extend(graph.neighbors(word, &selected));
            }
            visible.retain(|text| keep.contains(text));
        }

        if !state.origins.is_empty() {
            visible.retain(|text| {
                graph
                    .node(text)
                    .is_some_and(|node| state.origins.iter().any(|o| node.origins.contains(o)))
            });
        }

        if !state.node_layers.is_empty() {
            let participants = graph.participants(&state.node_layers);
            visible.retain(|text| participants.contains(text));
        }

        if let Some(target) = state.value {
            visible.retain(|text| graph.node(text).is_some_and(|node| node.has_value(target)));
        }

        let fading = state.fade_unconnected && highlight.is_some();
        let full: BTreeSet<&str> = match (&highlight, fading) {
            (Some(h), true) => {
                let mut full: BTreeSet<&str> = graph
                    .neighbors(h, &selected)
                    .into_iter()
                    .filter(|n| visible.contains(n))
                    .collect();
                if let Some(node) = graph.node(h) {
                    full.insert(node.text.as_str());
                }
                full
            }
            _ => visible.clone(),
        };

        let nodes = graph
            .nodes()
            .filter(|node| visible.contains(node.text.as_str()))
            .map(|node| {
                let highlighted = highlight.as_deref() == Some(node.text.as_str());
                let faded = fading && !full.contains(node.text.as_str());
                VisibleNode {
                    text: node.text.clone(),
                    position: self.layout.get(&node.text).unwrap_or_default(),
                    color: if highlighted {
                        WHITE
                    } else {
                        self.node_colors.get(&node.text).copied().unwrap_or(WHITE)
                    },
                    size: if highlighted {
                        HIGHLIGHT_NODE_SIZE
                    } else {
                        NODE_SIZE
                    },
                    opacity: if faded { FADE_OPACITY } else { 1.0 },
                    highlighted,
                    faded,
                }
            })
            .collect();

        let mut edges = Vec::new();
        if !state.hide_all_edges {
            for layer in &selected {
                let connection_filter = state
                    .connection_value
                    .filter(|_| state.connection_layers.iter().any(|l| l == *layer));

                let kept: Vec<_> = graph
                    .edges_in_layer(layer)
                    .filter(|e| visible.contains(e.source) && visible.contains(e.target))
                    .filter(|e| match connection_filter {
                        Some(target) => e.edge.value.equals_number(target),
                        None => true,
                    })
                    .filter(|e| !state.prime_only || is_prime(&e.edge.value))
                    .filter(|e| match (&highlight, fading) {
                        (Some(h), true) => {
                            full.contains(e.source) && full.contains(e.target) && e.touches(h)
                        }
                        _ => true,
                    })
                    .collect();

                let shades: Vec<&Value> = kept
                    .iter()
                    .map(|e| &e.edge.value)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let base = self.layer_colors.get(*layer).copied().unwrap_or(WHITE);

                let mut ordered = kept;
                ordered.sort_by(|a, b| a.edge.value.cmp(&b.edge.value));
                for e in ordered {
                    let rank = shades.iter().position(|v| *v == &e.edge.value).unwrap_or(0);
                    let style = if highlight.as_deref().is_some_and(|h| e.touches(h)) {
                        EdgeStyle::Highlight
                    } else if is_prime(&e.edge.value) && *layer != BINARY_SUM {
                        EdgeStyle::Prime
                    } else {
                        EdgeStyle::Default
                    };
                    let (width, color) = match style {
                        EdgeStyle::Highlight => (HIGHLIGHT_EDGE_WIDTH, GOLD),
                        EdgeStyle::Prime => (PRIME_EDGE_WIDTH, GOLD),
                        EdgeStyle::Default => (EDGE_WIDTH, base.adjust_lightness(shade_factor(rank, shades.len()))),
                    };
                    edges.push(VisibleEdge {
                        source: e.source.to_string(),
                        target: e.target.to_string(),
                        layer: e.edge.layer.clone(),
                        value: e.edge.value.clone(),
                        style,
                        width,
                        color,
                    });
                }
            }
        }

        Ok(VisibleView {
            nodes,
            edges,
            reason: None,
        })
    }
}

/// Lightness factor for the `rank`-th of `count` distinct values in a layer.
fn shade_factor(rank: usize, count: usize) -> f64 {
    if count > 1 {
        0.5 + 0.5 * rank as f64 / (count - 1) as f64
    } else {
        1.0
    }
}

/// Display form used for lookups; text that fails validation is kept as typed
/// and simply matches nothing.
fn display_form(raw: &str) -> String {
    resonance_indexer::canonicalize(raw)
        .map(|c| c.text)
        .unwrap_or_else(|_| raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_factor_spans_half_to_full() {
        assert_eq!(shade_factor(0, 1), 1.0);
        assert_eq!(shade_factor(0, 3), 0.5);
        assert_eq!(shade_factor(1, 3), 0.75);
        assert_eq!(shade_factor(2, 3), 1.0);
    }

    #[test]
    fn view_state_reads_partial_json() {
        let state: ViewState =
            serde_json::from_str(r#"{"highlight": "beans", "prime_only": true}"#).unwrap();
        assert_eq!(state.highlight.as_deref(), Some("beans"));
        assert!(state.prime_only);
        assert!(state.layers.is_none());
        assert!(serde_json::from_str::<ViewState>(r#"{"bogus": 1}"#).is_err());
    }
}
