//! # Resonance Graph
//!
//! Turns resonance groups into a multi-layer item graph and prepares it for
//! rendering.
//!
//! ## Architecture
//!
//! ```text
//! ItemRegistry + ResonanceIndex
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Nodes: every item, isolated ones included
//!     │      └─ Edges: one per item pair per shared (layer, value)
//!     │
//!     ├──> Layout (incremental, seeded force-directed, anchor pinned)
//!     ├──> Color (palette hash or resonance-weighted hue)
//!     │
//!     └──> View Filter
//!            ├─ word / origin / layer / value filters
//!            ├─ highlight and fade
//!            └─ edge styling: highlight > prime > default
//! ```

mod builder;
mod color;
mod error;
mod graph;
mod layout;
mod types;
mod view;

pub use builder::{build_graph, GraphBuilder, DEFAULT_LARGE_GROUP_WARN};
pub use color::{
    color_family, layer_colors, palette_color, resonance_color, resonance_weight, Color,
    ColorAssigner, ColorFamily, ColorMode, DEFAULT_PALETTE, GOLD, WHITE,
};
pub use error::{GraphError, Result};
pub use graph::EdgeView;
pub use layout::{layout, Layout, LayoutConfig, Position};
pub use types::{ItemNode, ResonanceEdge, ResonanceGraph};
pub use view::{
    EdgeStyle, ViewFilter, ViewState, VisibleEdge, VisibleNode, VisibleView, FADE_OPACITY,
};
