//! Data models for domain entities and relationships

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a domain entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A business object (customer, risk, coverage, ...)
    Entity,
    /// A contractual artifact
    Contract,
    /// A business process
    Process,
    /// A human or system role
    Role,
    /// A monetary transaction
    Transaction,
    /// A real-world occurrence
    Event,
}

/// Direction of a relationship, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source points at target
    Outbound,
    /// Target points at source
    Inbound,
}

/// A node in the domain graph
///
/// Immutable after load; shared read-only across all requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique string key
    pub id: String,
    /// Entity kind
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Human-readable name
    pub name: String,
    /// Short description
    pub description: String,
    /// Attribute names, in catalogue order
    pub attributes: Vec<String>,
    /// Owning team or department
    pub owner: String,
    /// Dimension name -> tags that dimension cares about
    #[serde(default)]
    pub impact_dimensions: BTreeMap<String, Vec<String>>,
}

/// A typed edge between two entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity id
    pub source: String,
    /// Target entity id
    pub target: String,
    /// Relationship type label, not required to be unique
    #[serde(rename = "type")]
    pub kind: String,
    /// Informational direction
    pub direction: Direction,
    /// Short description
    pub description: String,
    /// Attribute names carried on the edge
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Free-text business constraints
    #[serde(default)]
    pub business_rules: Vec<String>,
}
