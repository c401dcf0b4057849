//! Incremental 3D force-directed layout.
//!
//! Nodes that already have a position keep it; only newly seen nodes are
//! solved for, with a Fruchterman-Reingold pass in which every previously
//! placed node (and the anchor) is held fixed. Initial placement of new nodes
//! draws from a ChaCha stream seeded from the config, so the same node/edge
//! set and seed always give the same positions.

use crate::types::ResonanceGraph;
use ndarray::{Array1, Array2, Axis};
use petgraph::visit::EdgeRef;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type Position = [f64; 3];

const MIN_DISTANCE: f64 = 0.01;
const TRIVIAL_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    /// Item pinned to `anchor_position`, if registered.
    pub anchor: Option<String>,
    pub anchor_position: Position,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 50,
            anchor: Some("Beans".to_string()),
            anchor_position: [0.0, 0.0, 0.0],
        }
    }
}

/// Item -> position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<String, Position>,
}

impl Layout {
    pub fn get(&self, text: &str) -> Option<Position> {
        self.positions.get(text).copied()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.positions.contains_key(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Position)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<(String, Position)> for Layout {
    fn from_iter<T: IntoIterator<Item = (String, Position)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Positions for every node of `graph`.
///
/// Entries of `previous` for nodes still in the graph are copied unchanged;
/// entries for nodes no longer present are dropped.
pub fn layout(graph: &ResonanceGraph, previous: &Layout, config: &LayoutConfig) -> Layout {
    let texts: Vec<&str> = graph.nodes().map(|n| n.text.as_str()).collect();
    let anchor = config
        .anchor
        .as_deref()
        .filter(|anchor| graph.find_node(anchor).is_some());

    let mut fixed: Vec<Option<Position>> = texts
        .iter()
        .map(|text| {
            if Some(*text) == anchor {
                Some(config.anchor_position)
            } else {
                previous.get(text)
            }
        })
        .collect();

    let fresh = fixed.iter().filter(|p| p.is_none()).count();
    if fresh > 0 {
        if texts.len() <= 1 {
            for (i, slot) in fixed.iter_mut().enumerate() {
                if slot.is_none() {
                    // Off the origin, where the anchor is pinned by default.
                    let offset = (i + 1) as f64 * TRIVIAL_STEP;
                    *slot = Some([offset, offset, offset]);
                }
            }
        } else {
            let solved = solve(graph, &fixed, config);
            for (slot, position) in fixed.iter_mut().zip(solved) {
                slot.get_or_insert(position);
            }
        }
        log::debug!("Placed {fresh} new nodes ({} total)", texts.len());
    }

    texts
        .into_iter()
        .zip(fixed)
        .filter_map(|(text, position)| position.map(|p| (text.to_string(), p)))
        .collect()
}

fn solve(graph: &ResonanceGraph, fixed: &[Option<Position>], config: &LayoutConfig) -> Vec<Position> {
    let n = fixed.len();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut pos = Array2::<f64>::zeros((n, 3));
    for (i, slot) in fixed.iter().enumerate() {
        let p = match slot {
            Some(p) => *p,
            None => [rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>()],
        };
        for (d, v) in p.iter().enumerate() {
            pos[[i, d]] = *v;
        }
    }

    let adjacency = neighbor_sets(graph);

    let k = (1.0 / n as f64).sqrt();
    let span = pos
        .axis_iter(Axis(1))
        .map(|column| {
            let max = column.fold(f64::MIN, |m, &v| m.max(v));
            let min = column.fold(f64::MAX, |m, &v| m.min(v));
            max - min
        })
        .fold(0.0, f64::max);
    let mut temperature = (span * 0.1).max(MIN_DISTANCE);
    let cooling = temperature / (config.iterations as f64 + 1.0);

    for _ in 0..config.iterations {
        let mut displacement = Array2::<f64>::zeros((n, 3));
        for i in 0..n {
            if fixed[i].is_some() {
                continue;
            }
            let pi = pos.row(i);
            let mut force = Array1::<f64>::zeros(3);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = &pi - &pos.row(j);
                let distance = delta.dot(&delta).sqrt().max(MIN_DISTANCE);
                force.scaled_add(k * k / (distance * distance), &delta);
            }
            for &j in &adjacency[i] {
                let delta = &pi - &pos.row(j);
                let distance = delta.dot(&delta).sqrt().max(MIN_DISTANCE);
                force.scaled_add(-distance / k, &delta);
            }
            displacement.row_mut(i).assign(&force);
        }

        for i in 0..n {
            if fixed[i].is_some() {
                continue;
            }
            let mut row = displacement.row_mut(i);
            let length = row.dot(&row).sqrt().max(MIN_DISTANCE);
            row *= temperature / length;
            let mut p = pos.row_mut(i);
            p += &row;
        }

        temperature -= cooling;
    }

    pos.outer_iter().map(|row| [row[0], row[1], row[2]]).collect()
}

/// Distinct neighbors per node index; parallel edges across layers count once.
fn neighbor_sets(graph: &ResonanceGraph) -> Vec<BTreeSet<usize>> {
    let mut adjacency = vec![BTreeSet::new(); graph.graph.node_count()];
    for e in graph.graph.edge_references() {
        let (a, b) = (e.source().index(), e.target().index());
        if a != b {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
    }
    adjacency
}
