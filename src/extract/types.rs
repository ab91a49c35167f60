//! Schema types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Decimal,
    Boolean,
    ObjectArray,
    Object,
}

impl FieldType {
    /// Map a JSON value kind onto a field type
    ///
    /// Nulls carry no kind information and fall back to `String`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) | Value::Null => FieldType::String,
            Value::Number(_) => FieldType::Decimal,
            Value::Bool(_) => FieldType::Boolean,
            Value::Array(_) => FieldType::ObjectArray,
            Value::Object(_) => FieldType::Object,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Decimal => write!(f, "decimal"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::ObjectArray => write!(f, "object_array"),
            FieldType::Object => write!(f, "object"),
        }
    }
}

/// One field of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Format hint for strings (e.g., "date-time", "uri")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldDescriptor {
    /// Create a field without a format hint
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: None,
        }
    }
}

/// Field list of an entity
///
/// Inferred structures are best-effort: an empty `fields` list means the
/// schema is unknown, not that the entity has no fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityStructure {
    /// Entity name
    pub entity_name: String,
    /// Fields in record order
    pub fields: Vec<FieldDescriptor>,
}

impl EntityStructure {
    /// Create an empty structure for an entity
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            fields: Vec::new(),
        }
    }

    /// Whether no field information is available
    pub fn is_unknown(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
