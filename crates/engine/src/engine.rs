use crate::config::EngineConfig;
use crate::error::Result;
use resonance_encoding::EncodingRegistry;
use resonance_graph::{
    layer_colors, layout, Color, ColorAssigner, GraphBuilder, GraphError, Layout, ResonanceGraph,
    ViewFilter, ViewState, VisibleView,
};
use resonance_indexer::{
    IndexStats, ItemRegistry, RemovalOutcome, ResonanceGroup, ResonanceIndex, Submission,
};
use std::collections::BTreeMap;

/// Everything derived from one registry state.
pub(crate) struct Snapshot {
    pub(crate) index: ResonanceIndex,
    pub(crate) graph: ResonanceGraph,
    pub(crate) layout: Layout,
    pub(crate) node_colors: BTreeMap<String, Color>,
    pub(crate) layer_colors: BTreeMap<String, Color>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            index: ResonanceIndex::default(),
            graph: ResonanceGraph::default(),
            layout: Layout::default(),
            node_colors: BTreeMap::new(),
            layer_colors: BTreeMap::new(),
        }
    }
}

/// Owns the item registry and every structure derived from it.
///
/// Each mutation is followed by a full rebuild of the indices, groups and
/// graph; only the layout carries over, so existing items keep their
/// positions.
pub struct Engine {
    config: EngineConfig,
    encodings: EncodingRegistry,
    registry: ItemRegistry,
    builder: GraphBuilder,
    colors: ColorAssigner,
    snapshot: Snapshot,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let encodings = config.encodings()?;
        let registry = ItemRegistry::with_protected_origins(config.protected_origins.iter().cloned());
        let builder = GraphBuilder::new().with_large_group_warn(config.large_group_warn);
        let colors = ColorAssigner::new(config.color.mode, config.color.palette.clone());

        let mut engine = Self {
            config,
            encodings,
            registry,
            builder,
            colors,
            snapshot: Snapshot::default(),
        };
        engine.rebuild()?;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn encodings(&self) -> &EncodingRegistry {
        &self.encodings
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Submit one candidate. Rejections come back in the [`Submission`];
    /// only a failed rebuild is an error, and it undoes the submission.
    pub fn submit(&mut self, raw_text: &str, origin: &str) -> Result<Submission> {
        let previous = self.registry.clone();
        let submission = self.registry.submit(raw_text, origin);
        if submission.accepted {
            self.commit(previous)?;
        }
        Ok(submission)
    }

    /// Submit a batch under one origin with a single rebuild at the end.
    pub fn submit_many<'a>(
        &mut self,
        texts: impl IntoIterator<Item = &'a str>,
        origin: &str,
    ) -> Result<Vec<Submission>> {
        let previous = self.registry.clone();
        let submissions: Vec<Submission> = texts
            .into_iter()
            .map(|text| self.registry.submit(text, origin))
            .collect();
        if submissions.iter().any(|s| s.accepted) {
            self.commit(previous)?;
        }
        Ok(submissions)
    }

    /// Remove unconditionally.
    pub fn remove(&mut self, text: &str) -> Result<bool> {
        let previous = self.registry.clone();
        let removed = self.registry.remove(text);
        if removed {
            self.commit(previous)?;
        }
        Ok(removed)
    }

    /// Negative-feedback removal; items with a protected origin stay.
    pub fn reject(&mut self, text: &str) -> Result<RemovalOutcome> {
        let previous = self.registry.clone();
        let outcome = self.registry.reject(text);
        match outcome {
            RemovalOutcome::Removed => {
                self.commit(previous)?;
            }
            RemovalOutcome::Protected => {
                log::info!("Kept {text:?}: it carries a protected origin");
            }
            RemovalOutcome::Absent => {}
        }
        Ok(outcome)
    }

    /// Rebuild after a registry change, putting `previous` back if the
    /// rebuild fails so the registry always matches the published snapshot.
    fn commit(&mut self, previous: ItemRegistry) -> Result<()> {
        let result = self.rebuild().map(|_| ());
        restore_on_error(&mut self.registry, previous, result)
    }

    /// Recompute the index, groups, graph and colors from the registry.
    ///
    /// The layout is extended rather than recomputed. On failure the previous
    /// snapshot stays in place.
    pub fn rebuild(&mut self) -> Result<&IndexStats> {
        let index = ResonanceIndex::build(&self.registry, &self.encodings);
        let graph = self.builder.build(self.registry.iter(), &index)?;
        let layout = layout(&graph, &self.snapshot.layout, &self.config.layout);
        let node_colors = self.colors.assign(&graph);
        let layer_colors = layer_colors(&graph.layers, &self.config.layer_colors);

        self.snapshot = Snapshot {
            index,
            graph,
            layout,
            node_colors,
            layer_colors,
        };
        Ok(self.snapshot.index.stats())
    }

    pub fn stats(&self) -> &IndexStats {
        self.snapshot.index.stats()
    }

    pub fn index(&self) -> &ResonanceIndex {
        &self.snapshot.index
    }

    pub fn graph(&self) -> &ResonanceGraph {
        &self.snapshot.graph
    }

    pub fn layout(&self) -> &Layout {
        &self.snapshot.layout
    }

    pub fn node_colors(&self) -> &BTreeMap<String, Color> {
        &self.snapshot.node_colors
    }

    /// Resonance groups, layer-then-value order.
    pub fn groups(&self) -> &[ResonanceGroup] {
        self.snapshot.index.groups()
    }

    /// Full graph with layout and colors, restricted to `layers` (all when `None`).
    pub fn graph_view(&self, layers: Option<&[String]>) -> VisibleView {
        self.query(&ViewState {
            layers: layers.map(<[String]>::to_vec),
            ..ViewState::default()
        })
    }

    /// Visible view for `state`. An unknown layer yields an empty view with
    /// the reason attached.
    pub fn query(&self, state: &ViewState) -> VisibleView {
        let filter = ViewFilter {
            graph: &self.snapshot.graph,
            layout: &self.snapshot.layout,
            node_colors: &self.snapshot.node_colors,
            layer_colors: &self.snapshot.layer_colors,
        };
        match filter.apply(state) {
            Ok(view) => view,
            Err(err @ GraphError::UnknownLayer(_)) => {
                log::warn!("View query rejected: {err}");
                VisibleView::empty(err.to_string())
            }
            Err(err) => {
                log::error!("View query failed: {err}");
                VisibleView::empty(err.to_string())
            }
        }
    }

    /// Sorted display names, one per line.
    pub fn export(&self) -> String {
        resonance_indexer::export(&self.registry)
    }
}

fn restore_on_error(
    registry: &mut ItemRegistry,
    previous: ItemRegistry,
    result: Result<()>,
) -> Result<()> {
    if let Err(err) = &result {
        log::error!("Rebuild failed, registry change rolled back: {err}");
        *registry = previous;
    }
    result
}
