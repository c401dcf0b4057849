//! # Resonance Encoding
//!
//! Named, pure `text -> value` functions ("layers") and the predicates used
//! to decide whether a value is interesting.
//!
//! ## Contract
//!
//! - Every encoding is deterministic and total over arbitrary Unicode input.
//!   Characters an encoding does not understand contribute zero.
//! - Derived encodings (digit reductions of another encoding) are registered
//!   under their own name; callers never special-case them.
//! - Values that have no numeric meaning become [`Value::NotApplicable`] and
//!   are skipped by the predicates rather than reported as errors.

mod ciphers;
mod error;
pub mod predicates;
mod registry;
mod value;

pub use ciphers::*;
pub use error::{EncodingError, Result};
pub use registry::{Encoding, EncodingFn, EncodingRegistry};
pub use value::Value;
