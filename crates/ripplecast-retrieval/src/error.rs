//! Error types for context retrieval

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in retrieval operations
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The index artifact was never built; fatal at startup
    #[error("Retrieval index not found at {0}; build it with ripplecast-index first")]
    ConfigurationMissing(PathBuf),

    /// The index artifact exists but could not be read or validated; fatal
    /// at startup, distinct from the missing-artifact case so operators can
    /// tell "never built" from "corrupted"
    #[error("Retrieval index failed to load: {0}")]
    IndexLoadFailure(String),

    /// The embedding capability failed for a query or passage
    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    /// A query or passage embedding has the wrong dimension
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension declared by the index
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;
