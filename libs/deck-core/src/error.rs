//! Error types for deck-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur while validating a deck payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed deck payload: {0}")]
    Malformed(String),

    #[error("deck payload is not a list (found {found})")]
    NotAList { found: &'static str },

    #[error("deck is empty")]
    Empty,

    #[error("invalid card at index {index}: {reason}")]
    InvalidCard { index: usize, reason: String },
}
