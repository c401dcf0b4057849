//! # Resonance Engine
//!
//! Single owner of the item registry and all derived state: layer indices,
//! resonance groups, graph, layout and colors.
//!
//! ## Example
//!
//! ```
//! use resonance_engine::{Engine, EngineConfig};
//! use resonance_graph::ViewState;
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.submit_many(["Beans", "Dream", "Snaeb"], "_MANUAL_").unwrap();
//!
//! let view = engine.query(&ViewState {
//!     value: Some(48.0),
//!     ..ViewState::default()
//! });
//! assert_eq!(view.nodes.len(), 2);
//! ```

mod config;
mod engine;
mod error;
mod reports;
mod shared;

pub use config::{ColorConfig, EngineConfig, CONFIG_SCHEMA_VERSION};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use reports::{
    BinaryReport, HandReport, ItemReport, LayerFacts, NumberMatch, NumberReport, SharedResonance,
    ValueFacts,
};
pub use shared::SharedEngine;

pub use resonance_graph::{ViewState, VisibleView};
pub use resonance_indexer::{RejectReason, RemovalOutcome, Submission};
