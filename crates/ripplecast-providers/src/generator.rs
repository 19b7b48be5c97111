//! Text-generation capability trait

use async_trait::async_trait;

use crate::error::Result;

/// Opaque text-generation capability
///
/// Produces raw text for an instruction; the output carries no structural
/// guarantee. Retry and backoff, where desired, belong to implementations
/// of this trait, never to the callers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Unique identifier for logs and telemetry
    fn id(&self) -> &str;

    /// Generates raw text for the rendered instruction
    async fn generate(&self, instruction: &str) -> Result<String>;
}
