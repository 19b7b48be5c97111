//! Generation and embedding providers for Ripplecast
//!
//! The engine talks to two opaque capabilities: a text generator that turns
//! an instruction into raw text, and an embedder that turns text into a
//! vector. Both are narrow traits here, with OpenAI-compatible HTTP
//! implementations; tests substitute stubs.

#![warn(missing_docs)]

pub mod embeddings;
pub mod error;
pub mod generator;
pub mod openai_compat;

pub use embeddings::HttpEmbedder;
pub use error::{ProviderError, Result};
pub use generator::TextGenerator;
pub use openai_compat::{GeneratorConfig, OpenAiCompatGenerator};
