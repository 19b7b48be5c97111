//! Built-in insurance domain catalogue
//!
//! The catalogue ships embedded in the binary; alternate catalogues can be
//! supplied by constructing [`DomainGraph`] directly.

use serde::Deserialize;

use crate::error::Result;
use crate::graph::DomainGraph;
use crate::models::{Entity, Relationship};

const INSURANCE_CATALOGUE: &str = include_str!("../assets/insurance.json");

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

/// Parses the embedded insurance catalogue
pub fn insurance() -> Result<(Vec<Entity>, Vec<Relationship>)> {
    let file: CatalogueFile = serde_json::from_str(INSURANCE_CATALOGUE)?;
    Ok((file.entities, file.relationships))
}

impl DomainGraph {
    /// Builds the graph from the embedded insurance catalogue
    pub fn builtin() -> Result<Self> {
        let (entities, relationships) = insurance()?;
        Self::new(entities, relationships)
    }
}
