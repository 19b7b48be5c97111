//! Offline index construction
//!
//! The engine only ever reads the artifact; building it is a separate,
//! offline step driven by the `ripplecast-index` binary.

use tracing::info;

use crate::error::{Result, RetrievalError};
use crate::index::{IndexedPassage, VectorIndex};
use crate::retriever::Embedder;

/// Embeds every passage and assembles a [`VectorIndex`]
pub async fn build_index(embedder: &dyn Embedder, passages: &[String]) -> Result<VectorIndex> {
    let dimension = embedder.dimension();
    let mut indexed = Vec::with_capacity(passages.len());

    for passage in passages {
        let embedding = embedder.embed(passage).await?;
        if embedding.len() != dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: dimension,
                actual: embedding.len(),
            });
        }
        indexed.push(IndexedPassage {
            content: passage.clone(),
            embedding,
        });
    }

    info!(passages = indexed.len(), dimension, "index built");
    VectorIndex::new(dimension, indexed)
}
