//! Auth configuration types

use crate::error::Result;
use crate::template::{self, TemplateContext};
use crate::types::{Location, StringMap};
use serde::{Deserialize, Serialize};

/// Authentication configuration
///
/// String values may contain `{{ config.* }}` templates until rendered.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header name (for header location)
        #[serde(default)]
        header_name: Option<String>,
        /// Query parameter name (for query location)
        #[serde(default)]
        query_param: Option<String>,
        /// Prefix to add before the value (e.g., "Token ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// HTTP Basic authentication
    Basic {
        username: String,
        #[serde(default)]
        password: String,
    },

    /// Bearer token authentication
    Bearer { token: String },

    /// Arbitrary static headers
    CustomHeaders { headers: StringMap },
}

impl AuthConfig {
    /// Render every templated value against `ctx`
    pub fn render(&self, ctx: &TemplateContext) -> Result<AuthConfig> {
        Ok(match self {
            AuthConfig::None => AuthConfig::None,
            AuthConfig::ApiKey {
                location,
                header_name,
                query_param,
                prefix,
                value,
            } => AuthConfig::ApiKey {
                location: *location,
                header_name: header_name.clone(),
                query_param: query_param.clone(),
                prefix: prefix.clone(),
                value: template::render(value, ctx)?,
            },
            AuthConfig::Basic { username, password } => AuthConfig::Basic {
                username: template::render(username, ctx)?,
                password: template::render(password, ctx)?,
            },
            AuthConfig::Bearer { token } => AuthConfig::Bearer {
                token: template::render(token, ctx)?,
            },
            AuthConfig::CustomHeaders { headers } => AuthConfig::CustomHeaders {
                headers: headers
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), template::render(v, ctx)?)))
                    .collect::<Result<StringMap>>()?,
            },
        })
    }

    /// Short name of the auth type, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::CustomHeaders { .. } => "custom_headers",
        }
    }
}

// Secrets stay out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::ApiKey {
                location,
                header_name,
                query_param,
                ..
            } => f
                .debug_struct("ApiKey")
                .field("location", location)
                .field("header_name", header_name)
                .field("query_param", query_param)
                .finish_non_exhaustive(),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            AuthConfig::CustomHeaders { headers } => f
                .debug_struct("CustomHeaders")
                .field("headers", &headers.keys().collect::<Vec<_>>())
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}
