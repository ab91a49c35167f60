//! Connector definitions
//!
//! A connector is declared in YAML: where the API lives, how to
//! authenticate, how to page, and which entities map to which endpoints.
//! Built-in definitions are looked up by name; anything else is read from
//! a file path.

use crate::auth::AuthConfig;
use crate::connectors;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::mapping::{EndpointResolver, EntityMapping};
use crate::pagination::PaginationConfig;
use crate::template::{self, TemplateContext};
use crate::types::{BackoffType, OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Connector Definition
// ============================================================================

/// Complete connector definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorDefinition {
    /// Unique connector name (e.g., "liveagent")
    pub name: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Base URL, may contain `{{ config.* }}` templates
    pub base_url: String,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub http: HttpDefinition,

    /// Default pagination for every entity
    #[serde(default)]
    pub pagination: PaginationConfig,

    pub entities: Vec<EntityMapping>,
}

impl ConnectorDefinition {
    /// Title for display, falling back to the name
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| self.name.clone())
    }

    /// Build the entity resolver for this definition
    pub fn resolver(&self) -> Result<EndpointResolver> {
        EndpointResolver::new(self.entities.clone())
    }

    /// Render the base URL against the connection config
    pub fn render_base_url(&self, ctx: &TemplateContext) -> Result<String> {
        let rendered = template::render(&self.base_url, ctx)?;
        url::Url::parse(&rendered)?;
        Ok(rendered)
    }

    /// Build the HTTP client config with templates rendered
    pub fn client_config(&self, ctx: &TemplateContext) -> Result<HttpClientConfig> {
        let mut config = self.http.to_client_config(ctx)?;
        config.base_url = Some(self.render_base_url(ctx)?);
        Ok(config)
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client settings as written in YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpDefinition {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub backoff: BackoffType,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Requests per second; 0 disables rate limiting
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Burst size, defaults to `requests_per_second`
    #[serde(default)]
    pub burst: Option<u32>,

    /// Static headers, may contain templates
    #[serde(default)]
    pub headers: StringMap,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

fn default_requests_per_second() -> u32 {
    10
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            requests_per_second: default_requests_per_second(),
            burst: None,
            headers: StringMap::new(),
        }
    }
}

impl HttpDefinition {
    /// Convert to a client config, rendering header templates
    pub fn to_client_config(&self, ctx: &TemplateContext) -> Result<HttpClientConfig> {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match self.requests_per_second {
            0 => builder.no_rate_limit(),
            rps => builder.rate_limit(RateLimiterConfig::new(rps, self.burst.unwrap_or(rps))),
        };

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), template::render(value, ctx)?);
        }

        Ok(builder.build())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a connector definition from a built-in name or a file path
pub fn load_connector(name_or_path: impl AsRef<Path>) -> Result<ConnectorDefinition> {
    let path = name_or_path.as_ref();
    let path_str = path.to_string_lossy();

    let looks_like_name = !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml");

    if looks_like_name {
        if let Some(yaml) = connectors::get_builtin(&path_str) {
            return load_connector_from_str(yaml);
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Connector '{}' not found. Built-in connectors: {}. Or provide a path to a YAML file.",
                path.display(),
                connectors::list_builtin().join(", ")
            ))
        } else {
            Error::config(format!(
                "Failed to read connector file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    load_connector_from_str(&content)
}

/// Parse and validate a connector definition from YAML
pub fn load_connector_from_str(yaml: &str) -> Result<ConnectorDefinition> {
    let def: ConnectorDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse connector YAML: {e}")))?;

    validate_connector(&def)?;
    Ok(def)
}

/// Validate a connector definition
pub fn validate_connector(def: &ConnectorDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Connector name cannot be empty"));
    }

    if def.base_url.trim().is_empty() {
        return Err(Error::config(format!(
            "Connector '{}' base_url cannot be empty",
            def.name
        )));
    }

    if def.entities.is_empty() {
        return Err(Error::config(format!(
            "Connector '{}' must define at least one entity",
            def.name
        )));
    }

    validate_pagination(&def.name, &def.pagination)?;
    for entity in &def.entities {
        if let Some(ref pagination) = entity.pagination {
            validate_pagination(&entity.name, pagination)?;
        }
    }

    // Names, endpoints, duplicates, and placeholder declarations
    def.resolver()?;
    Ok(())
}

fn validate_pagination(owner: &str, pagination: &PaginationConfig) -> Result<()> {
    match pagination {
        PaginationConfig::Cursor { cursor_path, .. } if cursor_path.trim().is_empty() => Err(
            Error::config(format!("'{owner}' cursor pagination needs a cursor_path")),
        ),
        PaginationConfig::Offset { max_page_size, .. }
        | PaginationConfig::PageNumber { max_page_size, .. }
        | PaginationConfig::Cursor { max_page_size, .. }
            if *max_page_size == 0 =>
        {
            Err(Error::config(format!(
                "'{owner}' max_page_size must be greater than 0"
            )))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Connection Config
// ============================================================================

/// Parse connection config JSON (account names, API keys, ...)
pub fn parse_connection_config(json: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(Error::config("Connection config must be a JSON object"));
    }
    Ok(value)
}

/// Read connection config JSON from a file
pub fn load_connection_config(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_connection_config(&content)
}
