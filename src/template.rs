//! Template interpolation
//!
//! Two syntaxes live here:
//!
//! - `{{ config.api_key }}` renders connection config into connector
//!   definitions (base URL, auth values, static headers and params).
//! - `{conversationId}` marks an endpoint placeholder filled per request
//!   from the caller's filters. Values are URL-escaped as path segments.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching config variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Regex for matching endpoint placeholders: any `{...}` without nested braces
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Context for config interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Connection configuration values
    pub config: Value,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create context with config values
    pub fn with_config(config: Value) -> Self {
        Self { config }
    }

    /// Get a value by path (e.g., "config.api_key")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();

        // Bare names resolve against config
        match parts[0] {
            "config" => get_nested_value(&self.config, &parts[1..]),
            _ => get_nested_value(&self.config, &parts),
        }
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a `{{ }}` template string with the given context
///
/// Fails listing every undefined variable.
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut errors = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        let var_path = &cap[1];
        match ctx.get(var_path) {
            Some(value) => value_to_string(value),
            None => {
                errors.push(var_path.to_string());
                String::new()
            }
        }
    });

    if errors.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(errors.join(", ")))
    }
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

// ============================================================================
// Endpoint placeholders
// ============================================================================

/// Names of all `{placeholder}` tokens in an endpoint, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = &cap[1];
        if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every `{placeholder}` using `lookup`
///
/// Returns the names that `lookup` could not resolve as the error, so no
/// literal `{token}` ever reaches a URL.
pub fn substitute_placeholders<'a, F>(
    template: &str,
    lookup: F,
) -> std::result::Result<String, Vec<String>>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut unresolved: Vec<String> = Vec::new();

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        let name = &cap[1];
        if let Some(value) = lookup(name) {
            escape_path_segment(value)
        } else {
            if !unresolved.iter().any(|n| n == name) {
                unresolved.push(name.to_string());
            }
            cap[0].to_string()
        }
    });

    if unresolved.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(unresolved)
    }
}

/// Percent-encode a value for use inside a URL path
pub fn escape_path_segment(value: &str) -> String {
    // form_urlencoded writes spaces as '+' and escapes a literal '+' as %2B
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
