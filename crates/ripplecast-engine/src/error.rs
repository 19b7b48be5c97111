//! Error types for the orchestration engine

use thiserror::Error;

/// Errors that abort a whole analysis
///
/// Per-branch generation failures are not here; the orchestrator folds
/// those to schema defaults and keeps going.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Context retrieval failed (embedding or index)
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] ripplecast_retrieval::RetrievalError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
