//! Query-time context retrieval

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::index::VectorIndex;

/// Number of passages retrieved per query unless configured otherwise
pub const DEFAULT_K: usize = 3;

/// Text-embedding capability
///
/// Implementations live outside this crate; tests supply stubs.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Output dimension of [`embed`](Embedder::embed)
    fn dimension(&self) -> usize;

    /// Embeds one text into a vector of [`dimension`](Embedder::dimension)
    /// floats
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Retrieves relevant context passages for a query
///
/// Wraps a read-only [`VectorIndex`]; the constructor takes an already
/// loaded index so a missing or corrupt artifact fails at startup, never
/// silently per request.
pub struct ContextRetriever {
    index: VectorIndex,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl ContextRetriever {
    /// Creates a retriever over a loaded index
    pub fn new(index: VectorIndex, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index,
            embedder,
            k: DEFAULT_K,
        }
    }

    /// Overrides how many passages each query returns
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Returns the top passages for the query joined with newlines, most
    /// relevant first; an empty corpus yields an empty string, not an error
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        let embedding = self.embedder.embed(query).await?;
        let passages = self.index.search(&embedding, self.k)?;

        debug!(passages = passages.len(), k = self.k, "context retrieved");
        Ok(passages.join("\n"))
    }
}
