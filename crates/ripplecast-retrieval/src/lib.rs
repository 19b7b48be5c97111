//! Context retrieval over a read-only vector index
//!
//! The index is built offline (see [`builder`]) and loaded once at startup;
//! requests only ever read it. Query embedding goes through the [`Embedder`]
//! seam so the engine stays independent of any concrete embedding service.

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod index;
pub mod retriever;

pub use builder::build_index;
pub use error::{Result, RetrievalError};
pub use index::{IndexedPassage, VectorIndex};
pub use retriever::{ContextRetriever, Embedder};
