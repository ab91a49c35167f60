//! Record extraction and schema inference from JSON responses

use super::types::{EntityStructure, FieldDescriptor, FieldType};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

/// Extract the record array at `root_path`
///
/// The path is a dot-separated property chain (an optional `$.` prefix is
/// ignored); an empty path means the body itself is the array. Numeric
/// segments index into arrays (`data.0.items`). Paths with wildcards or
/// brackets, such as `$.data[*]`, are evaluated as JSONPath.
///
/// Never fails: a missing segment, a non-object intermediate, or a
/// non-array target all yield an empty vector.
pub fn extract_array(body: &Value, root_path: &str) -> Vec<Value> {
    let path = normalize_path(root_path);

    if path.contains('*') || path.contains('[') {
        return extract_with_jsonpath(body, path);
    }

    let target = if path.is_empty() {
        Some(body)
    } else {
        walk(body, path)
    };

    match target {
        Some(Value::Array(records)) => records.clone(),
        Some(other) => {
            debug!(
                "Root path '{}' points at {} instead of an array",
                root_path,
                kind_name(other)
            );
            Vec::new()
        }
        None => {
            debug!("Root path '{}' not found in response", root_path);
            Vec::new()
        }
    }
}

/// Look up a value by dotted path
///
/// Numeric segments index into arrays (`data.0.id`).
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = normalize_path(path);
    if path.is_empty() {
        return Some(value);
    }
    walk(value, path)
}

/// Look up a scalar by dotted path and render it as a string
pub fn lookup_string(value: &Value, path: &str) -> Option<String> {
    match lookup_path(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Look up a non-negative count by dotted path
///
/// Accepts numbers and numeric strings.
pub fn lookup_u64(value: &Value, path: &str) -> Option<u64> {
    match lookup_path(value, path)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Infer the structure of an entity from a page of records
///
/// Only the first record is inspected; the page is assumed uniform. Fields
/// keep the record's own key order. An empty page (or a first record that
/// is not an object) gives an empty field list.
pub fn infer_schema(entity_name: &str, records: &[Value]) -> EntityStructure {
    let mut structure = EntityStructure::new(entity_name);

    let Some(Value::Object(sample)) = records.first() else {
        return structure;
    };

    structure.fields = sample
        .iter()
        .map(|(name, value)| FieldDescriptor {
            name: name.clone(),
            field_type: FieldType::of(value),
            format: match value {
                Value::String(s) => detect_format(s),
                _ => None,
            },
        })
        .collect();

    structure
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    if path == "$" {
        return "";
    }
    path.strip_prefix("$.").unwrap_or(path)
}

fn walk<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Evaluate a JSONPath expression, returning matches as records
fn extract_with_jsonpath(value: &Value, path: &str) -> Vec<Value> {
    use jsonpath_rust::JsonPath;

    let expression = if path.starts_with('$') {
        path.to_string()
    } else {
        format!("$.{path}")
    };

    let jp = match JsonPath::try_from(expression.as_str()) {
        Ok(jp) => jp,
        Err(e) => {
            warn!("Invalid JSONPath root '{}': {}", path, e);
            return Vec::new();
        }
    };

    match jp.find(value) {
        Value::Array(records) => records,
        _ => Vec::new(),
    }
}

fn detect_format(s: &str) -> Option<String> {
    if DateTime::parse_from_rfc3339(s).is_ok() {
        Some("date-time".to_string())
    } else if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        Some("date".to_string())
    } else if s.starts_with("http://") || s.starts_with("https://") {
        Some("uri".to_string())
    } else {
        None
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
