//! Error types for the domain graph

use thiserror::Error;

/// Errors that can occur while building the domain graph
#[derive(Debug, Error)]
pub enum DomainError {
    /// Two entities share the same id
    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(String),

    /// A relationship references an entity id that is not in the catalogue
    #[error("Relationship '{kind}' references unknown entity: {endpoint}")]
    UnknownEndpoint {
        /// Relationship type label
        kind: String,
        /// The missing entity id
        endpoint: String,
    },

    /// The embedded catalogue could not be parsed
    #[error("Catalogue parse error: {0}")]
    CatalogueParse(#[from] serde_json::Error),
}

/// Result type for domain graph operations
pub type Result<T> = std::result::Result<T, DomainError>;
