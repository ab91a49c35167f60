//! Authentication module
//!
//! Supports: API Key (header or query), Basic, Bearer, Custom Headers
//!
//! Connector definitions declare auth with `{{ config.* }}` templates;
//! `AuthConfig::render` fills them from the connection config and the
//! `Authenticator` applies the result to every outgoing request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
