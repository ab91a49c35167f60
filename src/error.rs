//! Error types for entity connectors
//!
//! Configuration mistakes (unknown entity, missing filters) surface to the
//! caller before any request is sent. Upstream and response-shape errors are
//! still modelled here so the transport can report them, but the connector
//! layer absorbs them into empty results.

use thiserror::Error;

/// The main error type for entity connectors
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Entity Mapping Errors
    // ============================================================================
    #[error("Unknown entity '{entity}'")]
    UnknownEntity { entity: String },

    #[error("Entity '{entity}' is missing required filters: {}", missing.join(", "))]
    MissingRequiredFilter {
        entity: String,
        missing: Vec<String>,
    },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamFailure { status: u16, body: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown entity error
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
        }
    }

    /// Create a missing required filter error
    pub fn missing_filters(entity: impl Into<String>, missing: Vec<String>) -> Self {
        Self::MissingRequiredFilter {
            entity: entity.into(),
            missing,
        }
    }

    /// Create an upstream failure error
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Caller mistakes that must never be swallowed into an empty result
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::UnknownEntity { .. }
                | Error::MissingRequiredFilter { .. }
                | Error::InvalidFilter { .. }
                | Error::UndefinedVariable { .. }
                | Error::InvalidUrl(_)
        )
    }

    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::UpstreamFailure { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502..=504 | 520..=524)
}

/// Result type alias for entity connectors
pub type Result<T> = std::result::Result<T, Error>;
