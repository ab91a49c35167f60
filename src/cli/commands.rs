//! CLI commands and argument parsing

use crate::filter::Filter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Entity connectors CLI
#[derive(Parser, Debug)]
#[command(name = "entity-connectors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Built-in connector name or connector definition file (YAML)
    #[arg(short, long, global = true)]
    pub connector: Option<PathBuf>,

    /// Connection configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline connection configuration JSON (takes precedence over --config)
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in connectors
    List,

    /// Validate connector definition
    Validate,

    /// List entity names
    Entities,

    /// Show the field structure of an entity
    Structure {
        entity: String,

        /// Filters for sampling nested entities (field=value)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<Filter>,
    },

    /// Fetch all records of an entity
    Get {
        entity: String,

        /// Filters (field=value, field>=value, ...)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<Filter>,
    },

    /// Fetch one page of an entity
    Page {
        entity: String,

        /// Filters (field=value, field>=value, ...)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<Filter>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Records per page
        #[arg(long, default_value = "50")]
        size: u32,
    },

    /// Fetch every entity whose required filters are satisfied
    Sync {
        /// Filters shared by all entities
        #[arg(short = 'F', long = "filter")]
        filters: Vec<Filter>,

        /// Entities fetched at the same time
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Include records in the output, not just counts
        #[arg(long)]
        records: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOperator;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::try_parse_from([
            "entity-connectors",
            "--connector",
            "geodb",
            "--config-json",
            r#"{"api_key":"k"}"#,
            "page",
            "regions",
            "-F",
            "countryId=US",
            "--page",
            "2",
            "--size",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.connector, Some(PathBuf::from("geodb")));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Page {
                entity,
                filters,
                page,
                size,
            } => {
                assert_eq!(entity, "regions");
                assert_eq!(filters, vec![Filter::new("countryId", "US")]);
                assert_eq!(page, 2);
                assert_eq!(size, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_filter_operators() {
        let cli = Cli::try_parse_from([
            "entity-connectors",
            "get",
            "cities",
            "-F",
            "population>=100000",
            "--filter",
            "countryIds=US",
        ])
        .unwrap();

        let Commands::Get { filters, .. } = cli.command else {
            panic!("expected get");
        };
        assert_eq!(filters[0].operator, FilterOperator::Gte);
        assert_eq!(filters[0].value.as_deref(), Some("100000"));
        assert_eq!(filters[1].field, "countryIds");
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let result = Cli::try_parse_from(["entity-connectors", "get", "cities", "-F", "nonsense"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "entity-connectors",
            "sync",
            "--concurrency",
            "8",
            "-f",
            "pretty",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(
            cli.command,
            Commands::Sync {
                concurrency: 8,
                records: false,
                ..
            }
        ));
    }
}
