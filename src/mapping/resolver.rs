//! Endpoint resolution

use super::types::EntityMapping;
use crate::error::{Error, Result};
use crate::filter::QueryMap;
use crate::template;

/// Read-only table of entity mappings for one connector
#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
    entities: Vec<EntityMapping>,
}

impl EndpointResolver {
    /// Build a resolver, validating the table
    ///
    /// Rejects duplicate names, empty endpoints, and endpoints whose
    /// placeholders are blank or not all declared as required filters.
    /// Any `{...}` token counts as a placeholder, so nothing unresolved
    /// can survive substitution.
    pub fn new(entities: Vec<EntityMapping>) -> Result<Self> {
        for (i, entity) in entities.iter().enumerate() {
            if entity.name.trim().is_empty() {
                return Err(Error::config(format!("Entity #{i} has an empty name")));
            }

            if entity.endpoint.trim().is_empty() {
                return Err(Error::config(format!(
                    "Entity '{}' has an empty endpoint",
                    entity.name
                )));
            }

            if entities[..i]
                .iter()
                .any(|e| e.name.eq_ignore_ascii_case(&entity.name))
            {
                return Err(Error::config(format!(
                    "Entity '{}' is defined more than once",
                    entity.name
                )));
            }

            let placeholders = template::placeholders(&entity.endpoint);
            if placeholders.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::config(format!(
                    "Entity '{}' endpoint has an empty {{}} placeholder",
                    entity.name
                )));
            }

            let undeclared: Vec<String> = placeholders
                .into_iter()
                .filter(|p| {
                    !entity
                        .required_filters
                        .iter()
                        .any(|r| r.eq_ignore_ascii_case(p))
                })
                .collect();
            if !undeclared.is_empty() {
                return Err(Error::config(format!(
                    "Entity '{}' endpoint uses placeholders not listed in required_filters: {}",
                    entity.name,
                    undeclared.join(", ")
                )));
            }
        }

        Ok(Self { entities })
    }

    /// Entity names in declaration order
    pub fn entity_names(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.name.clone()).collect()
    }

    /// All mappings in declaration order
    pub fn entities(&self) -> &[EntityMapping] {
        &self.entities
    }

    /// Look up the mapping for an entity (case-insensitive)
    pub fn resolve(&self, entity: &str) -> Result<&EntityMapping> {
        let entity = entity.trim();
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(entity))
            .ok_or_else(|| Error::unknown_entity(entity))
    }

    /// Replace `{key}` tokens with URL-escaped values from `query`
    ///
    /// Any token without a value fails with `MissingRequiredFilter` listing
    /// every unresolved name.
    pub fn substitute(endpoint: &str, query: &QueryMap) -> Result<String> {
        template::substitute_placeholders(endpoint, |name| query.get(name))
            .map_err(|missing| Error::missing_filters(endpoint, missing))
    }
}
