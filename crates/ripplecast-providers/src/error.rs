//! Error types for provider capabilities

use thiserror::Error;

/// Errors that can occur when invoking a provider
///
/// All of these mean the provider produced nothing usable: the task runner
/// never swallows them, the orchestrator decides per-branch isolation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider misconfigured (missing key, bad URL)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication failed (never includes key details)
    #[error("Authentication failed")]
    AuthError,

    /// Rate limited by the provider
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Network-level failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider responded but could not serve the request
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Unavailable("request timeout".to_string())
        } else if err.is_connect() {
            ProviderError::NetworkError(err.to_string())
        } else {
            ProviderError::Unavailable(err.to_string())
        }
    }
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
