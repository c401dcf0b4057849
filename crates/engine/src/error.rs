use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Encoding(#[from] resonance_encoding::EncodingError),

    #[error(transparent)]
    Indexer(#[from] resonance_indexer::IndexerError),

    #[error(transparent)]
    Graph(#[from] resonance_graph::GraphError),

    #[error("Unknown item: {0}")]
    UnknownItem(String),
}
