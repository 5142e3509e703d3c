//! Error types for loading and writing canvas documents.

use thiserror::Error;

/// Error returned when text cannot be loaded as a canvas document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not JSON, or its shape does not match a canvas document.
    #[error("invalid canvas document: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Two nodes share the same `id`.
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),
}

/// Error returned when a canvas document cannot be written as JSON.
#[derive(Debug, Error)]
#[error("failed to serialize canvas document: {0}")]
pub struct SerializeError(#[from] pub serde_json::Error);
