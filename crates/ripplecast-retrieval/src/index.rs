//! Read-only vector index artifact

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RetrievalError};

/// A passage with its precomputed embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedPassage {
    /// Passage text
    pub content: String,
    /// Embedding vector, `dimension` floats
    pub embedding: Vec<f32>,
}

/// In-memory similarity-search index, loaded from a JSON artifact
///
/// Read-only after load; safe for unlimited concurrent readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    /// Embedding dimension every passage must match
    pub dimension: usize,
    /// Indexed passages
    pub passages: Vec<IndexedPassage>,
}

impl VectorIndex {
    /// Creates an index from embedded passages, validating dimensions
    pub fn new(dimension: usize, passages: Vec<IndexedPassage>) -> Result<Self> {
        for passage in &passages {
            if passage.embedding.len() != dimension {
                return Err(RetrievalError::DimensionMismatch {
                    expected: dimension,
                    actual: passage.embedding.len(),
                });
            }
        }
        Ok(Self { dimension, passages })
    }

    /// Loads the artifact from disk
    ///
    /// A missing file is [`RetrievalError::ConfigurationMissing`]; anything
    /// present but unreadable or malformed is
    /// [`RetrievalError::IndexLoadFailure`]. Both are fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RetrievalError::ConfigurationMissing(path.to_path_buf())
            } else {
                RetrievalError::IndexLoadFailure(e.to_string())
            }
        })?;

        let index: VectorIndex = serde_json::from_str(&raw)
            .map_err(|e| RetrievalError::IndexLoadFailure(e.to_string()))?;

        for passage in &index.passages {
            if passage.embedding.len() != index.dimension {
                return Err(RetrievalError::IndexLoadFailure(format!(
                    "passage embedding has dimension {}, index declares {}",
                    passage.embedding.len(),
                    index.dimension
                )));
            }
        }

        debug!(passages = index.passages.len(), dimension = index.dimension, "vector index loaded");
        Ok(index)
    }

    /// Writes the artifact to disk
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string(self)?;
        std::fs::write(path, raw)
    }

    /// Returns the contents of the `k` most similar passages, most relevant
    /// first; tolerates `k` larger than the corpus
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<String>> {
        if query.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(f32, &str)> = self
            .passages
            .iter()
            .map(|p| (cosine_similarity(query, &p.embedding), p.content.as_str()))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(_, content)| content.to_owned()).collect())
    }

    /// Number of indexed passages
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the index holds no passages
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
