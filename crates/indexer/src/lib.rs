//! # Resonance Indexer
//!
//! Item registry, per-layer value indices and resonance group extraction.
//!
//! ## Pipeline
//!
//! ```text
//! Raw text + origin
//!     │
//!     ├──> ItemRegistry (validate, canonicalize, merge origins)
//!     │      └─> Items
//!     │
//!     ├──> LayerIndexSet (one value partition per encoding)
//!     │      └─> value -> items buckets
//!     │
//!     └──> extract_all
//!            └─> Resonance groups (buckets of two or more)
//! ```
//!
//! ## Example
//!
//! ```
//! use resonance_encoding::builtin_registry;
//! use resonance_indexer::{ItemRegistry, ResonanceIndex};
//!
//! let mut registry = ItemRegistry::new();
//! registry.add("Beans", "_MANUAL_").unwrap();
//! registry.add("Snaeb", "_MANUAL_").unwrap();
//!
//! let index = ResonanceIndex::build(&registry, &builtin_registry());
//! assert!(index.groups_in("Simple").any(|g| g.items.len() == 2));
//! ```

mod error;
mod export;
mod index;
mod ingest;
mod item;
mod layer_index;
mod registry;
mod resonance;
mod stats;

pub use error::{IndexerError, Result};
pub use export::export;
pub use index::ResonanceIndex;
pub use ingest::{tokenize_phrase_list, tokenize_word_list, RejectReason, Submission};
pub use item::{
    canonicalize, identity, Canonical, Item, IMPORTED_LIST_ORIGIN, MANUAL_ORIGIN, SEARCH_ORIGIN,
};
pub use layer_index::{LayerIndex, LayerIndexSet};
pub use registry::{ItemRegistry, RemovalOutcome};
pub use resonance::{extract, extract_all, ResonanceGroup};
pub use stats::IndexStats;
