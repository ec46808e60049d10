//! Error types for the viewer.

use thiserror::Error;

pub use deck_core::ValidationError;

/// Fetching the deck failed before any payload could be validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {reason}")]
    Request { reason: String },

    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to read response body: {reason}")]
    Body { reason: String },
}

/// Errors that abort a deck load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A face's markdown could not be converted. Contained to that face.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("markdown render failed: {0}")]
pub struct RenderError(pub String);

/// The math engine failed or never became available. Always non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesetError {
    #[error("typesetting engine is not initialized")]
    NotInitialized,

    #[error("timed out waiting for the typesetting engine")]
    Timeout,

    #[error("typesetting failed: {0}")]
    Engine(String),
}
