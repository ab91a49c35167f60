//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{
    load_connection_config, load_connector, parse_connection_config, ConnectorDefinition,
};
use crate::connector::{EntityConnector, RestConnector};
use crate::connectors::list_builtin_info;
use crate::error::{Error, Result};
use crate::filter::Filter;
use serde_json::{json, Value};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let message = self.execute().await?;
        self.output_message(&message);
        Ok(())
    }

    /// Run the CLI command and return its output message
    pub async fn execute(&self) -> Result<Value> {
        match &self.cli.command {
            Commands::List => self.list_connectors(),
            Commands::Validate => self.validate(),
            Commands::Entities => self.entities(),
            Commands::Structure { entity, filters } => self.structure(entity, filters).await,
            Commands::Get { entity, filters } => self.get(entity, filters).await,
            Commands::Page {
                entity,
                filters,
                page,
                size,
            } => self.page(entity, filters, *page, *size).await,
            Commands::Sync {
                filters,
                concurrency,
                records,
            } => self.sync(filters, *concurrency, *records).await,
        }
    }

    /// Load connector definition
    fn load_definition(&self) -> Result<ConnectorDefinition> {
        let path = self
            .cli
            .connector
            .as_ref()
            .ok_or_else(|| Error::config("Connector not specified (use -c flag)"))?;
        load_connector(path)
    }

    /// Load connection configuration
    fn load_config(&self) -> Result<Value> {
        if let Some(json_str) = &self.cli.config_json {
            return parse_connection_config(json_str);
        }

        if let Some(path) = &self.cli.config {
            return load_connection_config(path);
        }

        Ok(json!({}))
    }

    /// Build the REST connector for this invocation
    fn build_connector(&self) -> Result<RestConnector> {
        let def = self.load_definition()?;
        let config = self.load_config()?;
        debug!("Building connector '{}'", def.name);
        RestConnector::from_definition(&def, &config)
    }

    /// List built-in connectors
    fn list_connectors(&self) -> Result<Value> {
        let connectors = list_builtin_info()?;

        Ok(json!({
            "type": "CONNECTORS",
            "connectors": connectors
        }))
    }

    /// Validate connector definition
    fn validate(&self) -> Result<Value> {
        let def = self.load_definition()?;

        Ok(json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Connector '{}' is valid with {} entities",
                    def.name,
                    def.entities.len()
                )
            }
        }))
    }

    /// List entity names (no connection config needed)
    fn entities(&self) -> Result<Value> {
        let def = self.load_definition()?;
        let entities: Vec<Value> = def
            .entities
            .iter()
            .map(|e| {
                json!({
                    "name": e.name,
                    "endpoint": e.endpoint,
                    "required_filters": e.required_filters,
                })
            })
            .collect();

        Ok(json!({
            "type": "ENTITIES",
            "connector": def.name,
            "entities": entities
        }))
    }

    async fn structure(&self, entity: &str, filters: &[Filter]) -> Result<Value> {
        let connector = self.build_connector()?;
        let structure = connector.get_structure_with(entity, filters).await?;

        Ok(json!({
            "type": "STRUCTURE",
            "connector": connector.name(),
            "structure": structure
        }))
    }

    async fn get(&self, entity: &str, filters: &[Filter]) -> Result<Value> {
        let connector = self.build_connector()?;
        let records = connector.get_entities(entity, filters).await?;

        Ok(json!({
            "type": "RECORDS",
            "entity": entity,
            "count": records.len(),
            "records": records
        }))
    }

    async fn page(&self, entity: &str, filters: &[Filter], page: u32, size: u32) -> Result<Value> {
        let connector = self.build_connector()?;
        let result = connector
            .get_entities_page(entity, filters, page, size)
            .await?;

        Ok(json!({
            "type": "PAGE",
            "entity": entity,
            "page": result
        }))
    }

    async fn sync(&self, filters: &[Filter], concurrency: usize, records: bool) -> Result<Value> {
        let connector = self.build_connector()?;
        let summaries = connector
            .sync_all_with_records(filters, concurrency, records)
            .await;

        let entities: Vec<Value> = summaries
            .iter()
            .map(|s| {
                let mut summary = json!(s);
                if records {
                    summary["items"] = json!(s.items);
                }
                summary
            })
            .collect();

        Ok(json!({
            "type": "SYNC",
            "connector": connector.name(),
            "total_records": summaries.iter().map(|s| s.records).sum::<usize>(),
            "entities": entities
        }))
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
