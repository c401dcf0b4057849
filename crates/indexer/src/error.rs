use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexerError {
    #[error("Invalid item {text:?}: {reason}")]
    Validation { text: String, reason: String },

    #[error("Encoding error: {0}")]
    Encoding(#[from] resonance_encoding::EncodingError),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}

impl IndexerError {
    pub(crate) fn validation(text: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
