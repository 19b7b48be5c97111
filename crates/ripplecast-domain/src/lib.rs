//! Static domain graph for Ripplecast impact analysis
//!
//! This crate provides the catalogue of business entities and the typed
//! relationships between them, plus the keyword matcher that surfaces which
//! parts of the domain a change description touches.
//!
//! The graph is built once at process start, validated, and shared read-only
//! across all requests. Matching is deterministic and intentionally
//! permissive: false positives are preferred over false negatives because
//! the matched entities are advisory, never gating.

#![warn(missing_docs)]

pub mod catalogue;
pub mod error;
pub mod graph;
pub mod models;

pub use error::{DomainError, Result};
pub use graph::DomainGraph;
pub use models::{Direction, Entity, EntityKind, Relationship};
