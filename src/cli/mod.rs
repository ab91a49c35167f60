//! CLI module
//!
//! Command-line interface for running connectors.
//!
//! # Commands
//!
//! - `list` - List built-in connectors
//! - `validate` - Validate a connector definition
//! - `entities` - List entity names
//! - `structure` - Describe an entity's fields
//! - `get` / `page` - Fetch records, whole or one page
//! - `sync` - Fetch every entity concurrently

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
