//! Error types for paircanvas operations.
//!
//! This module provides the main error type [`PairCanvasError`]. Only
//! conditions that abort a run are represented here; a missing or unreadable
//! canvas document and a missing node rectangle are recovered where they
//! occur and only logged.

use std::{io, path::PathBuf};

use thiserror::Error;

use paircanvas_canvas::SerializeError;

/// The main error type for paircanvas operations.
#[derive(Debug, Error)]
pub enum PairCanvasError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A directory selected for scanning is missing or cannot be listed.
    #[error("Cannot read directory `{}`: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialize error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PairCanvasError {
    /// Create a new `DirectoryUnreadable` error for `path`.
    pub fn directory_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }
}
