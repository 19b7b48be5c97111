//! Keyword-based impact matching over the domain graph

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::error::{DomainError, Result};
use crate::models::{Entity, Relationship};

/// Immutable catalogue of entities and relationships with keyword matching
///
/// Constructed once at startup and passed by reference into the
/// orchestrator; never a process-wide singleton, so tests can run against
/// synthetic catalogues.
#[derive(Debug, Clone)]
pub struct DomainGraph {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
    /// Per-entity lowercased keywords, parallel to `entities`
    keywords: Vec<Vec<String>>,
}

impl DomainGraph {
    /// Builds a graph, validating that every relationship endpoint exists
    /// and that entity ids are unique
    pub fn new(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Result<Self> {
        let mut ids = HashSet::new();
        for entity in &entities {
            if !ids.insert(entity.id.as_str()) {
                return Err(DomainError::DuplicateEntity(entity.id.clone()));
            }
        }

        for rel in &relationships {
            for endpoint in [&rel.source, &rel.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(DomainError::UnknownEndpoint {
                        kind: rel.kind.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        let keywords = entities.iter().map(entity_keywords).collect();

        debug!(
            entities = entities.len(),
            relationships = relationships.len(),
            "domain graph loaded"
        );

        Ok(Self {
            entities,
            relationships,
            keywords,
        })
    }

    /// Returns the ids of entities whose name, attributes, or description
    /// occur as a substring of the input, case-insensitively
    ///
    /// The result is deduplicated and sorted for reproducible comparison.
    pub fn match_text(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();

        let impacted: BTreeSet<&str> = self
            .entities
            .iter()
            .zip(&self.keywords)
            .filter(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw.as_str())))
            .map(|(entity, _)| entity.id.as_str())
            .collect();

        impacted.into_iter().map(str::to_owned).collect()
    }

    /// Returns the sorted set of relationship type labels touching any of
    /// the given entity ids
    ///
    /// Multiple edges sharing a label collapse into one entry; `details`
    /// consumers that need edge identity use [`relationships_by_kinds`].
    ///
    /// [`relationships_by_kinds`]: DomainGraph::relationships_by_kinds
    pub fn relationships_for(&self, entity_ids: &[String]) -> Vec<String> {
        let ids: HashSet<&str> = entity_ids.iter().map(String::as_str).collect();

        let kinds: BTreeSet<&str> = self
            .relationships
            .iter()
            .filter(|rel| ids.contains(rel.source.as_str()) || ids.contains(rel.target.as_str()))
            .map(|rel| rel.kind.as_str())
            .collect();

        kinds.into_iter().map(str::to_owned).collect()
    }

    /// Returns full entity records for the given ids, in catalogue order
    pub fn entities_by_ids(&self, ids: &[String]) -> Vec<Entity> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.entities
            .iter()
            .filter(|e| wanted.contains(e.id.as_str()))
            .cloned()
            .collect()
    }

    /// Returns full relationship records for the given type labels, in
    /// catalogue order
    pub fn relationships_by_kinds(&self, kinds: &[String]) -> Vec<Relationship> {
        let wanted: HashSet<&str> = kinds.iter().map(String::as_str).collect();
        self.relationships
            .iter()
            .filter(|r| wanted.contains(r.kind.as_str()))
            .cloned()
            .collect()
    }

    /// All entities in the catalogue
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// All relationships in the catalogue
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

fn entity_keywords(entity: &Entity) -> Vec<String> {
    let mut keywords = Vec::with_capacity(entity.attributes.len() + 2);
    keywords.push(entity.name.to_lowercase());
    keywords.extend(entity.attributes.iter().map(|a| a.to_lowercase()));
    keywords.push(entity.description.to_lowercase());
    keywords.retain(|kw| !kw.is_empty());
    keywords
}
