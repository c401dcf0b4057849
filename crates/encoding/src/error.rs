use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncodingError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Encoding already registered: {0}")]
    DuplicateEncoding(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Invalid encoding name: {0:?}")]
    InvalidName(String),
}
