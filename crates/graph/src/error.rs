use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A group or edge refers to an item that is not a node. Indicates a bug
    /// in the build pipeline; the build is aborted.
    #[error("Graph invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
