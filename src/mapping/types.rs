//! Entity mapping types

use super::resolver::EndpointResolver;
use crate::error::{Error, Result};
use crate::extract::FieldDescriptor;
use crate::filter::QueryMap;
use crate::pagination::PaginationConfig;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// How one logical entity maps onto a REST endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMapping {
    /// Logical entity name
    pub name: String,

    /// Endpoint path with `{placeholder}` tokens
    pub endpoint: String,

    /// Dotted path to the record array in the response; empty for a bare array
    #[serde(default)]
    pub root_path: String,

    /// Filters that must be supplied for this entity
    #[serde(default)]
    pub required_filters: Vec<String>,

    /// Static query parameters sent with every request
    #[serde(default)]
    pub params: StringMap,

    /// Declared fields; when present no sample request is needed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,

    /// Pagination override for this entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationConfig>,

    /// Dotted path to the upstream total record count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityMapping {
    /// Create a mapping with no required filters
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        root_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            root_path: root_path.into(),
            required_filters: Vec::new(),
            params: StringMap::new(),
            fields: Vec::new(),
            pagination: None,
            total_path: None,
            description: None,
        }
    }

    /// Add a required filter
    #[must_use]
    pub fn require(mut self, filter: impl Into<String>) -> Self {
        self.required_filters.push(filter.into());
        self
    }

    /// Add a static query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the declared fields
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Set a pagination override
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Set the total count path
    #[must_use]
    pub fn with_total_path(mut self, path: impl Into<String>) -> Self {
        self.total_path = Some(path.into());
        self
    }

    /// Substitute this entity's endpoint, naming the entity on failure
    pub fn endpoint_url(&self, query: &QueryMap) -> Result<String> {
        EndpointResolver::substitute(&self.endpoint, query).map_err(|e| match e {
            Error::MissingRequiredFilter { missing, .. } => {
                Error::missing_filters(&self.name, missing)
            }
            other => other,
        })
    }
}
