//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("IO error reading catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not a valid JSON array of items.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share the same identifier.
    #[error("duplicate catalog id '{id}' at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    /// An item has an empty (or whitespace-only) identifier.
    #[error("catalog item at position {position} has an empty id")]
    EmptyId { position: usize },
}

impl CatalogError {
    /// Creates an IO error for the given catalog path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
