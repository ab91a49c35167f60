//! Built-in connector definitions embedded in the binary
//!
//! Lets users pass `--connector liveagent` instead of a file path.

use crate::config::{load_connector_from_str, ConnectorDefinition};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in connector YAML definitions, keyed by name and alias
pub static BUILTIN_CONNECTORS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();

        // Support desks
        m.insert("liveagent", include_str!("../connectors/liveagent.yaml"));
        m.insert("ladesk", include_str!("../connectors/liveagent.yaml"));

        // Social media
        m.insert("loomly", include_str!("../connectors/loomly.yaml"));

        // Reference data
        m.insert("geodb", include_str!("../connectors/geodb.yaml"));
        m.insert("geo-db", include_str!("../connectors/geodb.yaml"));

        // Chat
        m.insert("slack", include_str!("../connectors/slack.yaml"));

        m
    });

/// Primary names, without aliases
const PRIMARY_NAMES: &[&str] = &["geodb", "liveagent", "loomly", "slack"];

/// Get a built-in connector YAML by name or alias
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_CONNECTORS
        .get(name.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Check if a name refers to a built-in connector
pub fn is_builtin(name: &str) -> bool {
    get_builtin(name).is_some()
}

/// List built-in connector names (primary names only)
pub fn list_builtin() -> Vec<&'static str> {
    PRIMARY_NAMES.to_vec()
}

/// Parse a built-in definition
pub fn builtin_definition(name: &str) -> Result<ConnectorDefinition> {
    let yaml = get_builtin(name).ok_or_else(|| {
        Error::config(format!(
            "Unknown built-in connector '{}'. Built-in connectors: {}",
            name,
            list_builtin().join(", ")
        ))
    })?;
    load_connector_from_str(yaml)
}

/// Summary of a built-in connector
#[derive(Debug, Clone, Serialize)]
pub struct ConnectorInfo {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub aliases: Vec<&'static str>,
    pub entities: Vec<String>,
}

/// Describe every built-in connector
pub fn list_builtin_info() -> Result<Vec<ConnectorInfo>> {
    list_builtin()
        .into_iter()
        .map(|name| {
            let def = builtin_definition(name)?;
            let yaml = get_builtin(name);
            let mut aliases: Vec<&'static str> = BUILTIN_CONNECTORS
                .iter()
                .filter(|&(alias, content)| *alias != name && Some(*content) == yaml)
                .map(|(alias, _)| *alias)
                .collect();
            aliases.sort_unstable();

            Ok(ConnectorInfo {
                name: def.name.clone(),
                title: def.display_title(),
                description: def.description.clone(),
                aliases,
                entities: def.entities.iter().map(|e| e.name.clone()).collect(),
            })
        })
        .collect()
}
