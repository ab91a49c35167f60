// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Entity Connectors
//!
//! Uniform "entity / filter / paged result" access to third-party JSON
//! REST APIs. Each connector is a table mapping entity names to endpoint
//! templates, result root paths, and required filters.
//!
//! ## Features
//!
//! - **Entity mapping**: `{placeholder}` endpoints filled from filters
//! - **Extraction**: record arrays pulled out of response envelopes by dotted path
//! - **Schema inference**: field types guessed from a sample record
//! - **Pagination**: offset, page number, and cursor APIs behind one page model
//! - **Resilient reads**: upstream failures degrade to empty results
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entity_connectors::{load_connector, EntityConnector, Filter, RestConnector};
//!
//! #[tokio::main]
//! async fn main() -> entity_connectors::Result<()> {
//!     let def = load_connector("geodb")?;
//!     let config = serde_json::json!({ "api_key": "..." });
//!     let connector = RestConnector::from_definition(&def, &config)?;
//!
//!     let page = connector
//!         .get_entities_page("regions", &[Filter::new("countryId", "US")], 1, 10)
//!         .await?;
//!     println!("{} of {} regions", page.items.len(), page.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! entity + filters + page
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌───────────┐   ┌────────────┐   ┌───────────┐
//! │   mapping    │──▶│    filter    │──▶│ transport │──▶│  extract   │──▶│ paginate  │
//! │ resolve      │   │ to_query_map │   │ HTTP GET  │   │ root path  │   │ wrap page │
//! │ substitute   │   │ validate     │   │ retry/auth│   │ infer      │   │           │
//! └──────────────┘   └──────────────┘   └───────────┘   └────────────┘   └───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Template interpolation and endpoint placeholders
pub mod template;

/// Filters and query maps
pub mod filter;

/// Entity to endpoint mapping
pub mod mapping;

/// Record extraction and schema inference
pub mod extract;

/// Pagination strategies
pub mod pagination;

/// Authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Connector definitions
pub mod config;

/// Connector trait and REST implementation
pub mod connector;

/// Built-in connector definitions
pub mod connectors;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{load_connector, load_connector_from_str, ConnectorDefinition};
pub use connector::{
    BlockingConnector, EntityConnector, EntitySyncSummary, RestConnector, SyncStatus,
};
pub use extract::{EntityStructure, FieldDescriptor, FieldType};
pub use filter::{Filter, FilterOperator, QueryMap};
pub use mapping::{EndpointResolver, EntityMapping};
pub use pagination::{PagedResult, PaginationConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
