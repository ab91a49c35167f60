//! Entity connectors
//!
//! The `EntityConnector` trait is the inbound surface: list entities,
//! describe their structure, and fetch records whole or one page at a time.
//!
//! # Overview
//!
//! - `RestConnector` - maps entities onto a JSON REST API through a `Transport`
//! - `BlockingConnector` - synchronous adapter owning its own runtime
//! - `EntitySyncSummary` - per-entity outcome of `sync_all`

mod blocking;
mod rest;

pub use blocking::BlockingConnector;
pub use rest::RestConnector;

use crate::error::{Error, Result};
use crate::extract::EntityStructure;
use crate::filter::Filter;
use crate::pagination::PagedResult;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Uniform read access to the entities of one upstream system
#[async_trait]
pub trait EntityConnector: Send + Sync {
    /// Connector name
    fn name(&self) -> &str;

    /// Entity names in declaration order
    fn list_entities(&self) -> Vec<String>;

    /// Field structure of an entity
    async fn get_structure(&self, entity: &str) -> Result<EntityStructure>;

    /// All records of an entity matching the filters, across every upstream page
    async fn get_entities(&self, entity: &str, filters: &[Filter]) -> Result<Vec<Value>>;

    /// One 1-based page of records
    async fn get_entities_page(
        &self,
        entity: &str,
        filters: &[Filter],
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult>;

    /// Fetch every entity concurrently
    ///
    /// Entities whose required filters are not satisfied are skipped. A
    /// failing entity is reported in its summary and never aborts the batch.
    async fn sync_all(&self, filters: &[Filter], concurrency: usize) -> Vec<EntitySyncSummary> {
        self.sync_all_with_records(filters, concurrency, false).await
    }

    /// `sync_all`, optionally keeping the fetched records in each summary
    async fn sync_all_with_records(
        &self,
        filters: &[Filter],
        concurrency: usize,
        keep_records: bool,
    ) -> Vec<EntitySyncSummary> {
        let names = self.list_entities();
        info!(
            "Syncing {} entities from '{}' (concurrency {})",
            names.len(),
            self.name(),
            concurrency.max(1)
        );

        let mut summaries: Vec<EntitySyncSummary> = stream::iter(names)
            .map(|entity| async move {
                let outcome = self.get_entities(&entity, filters).await;
                EntitySyncSummary::from_outcome(entity, outcome, keep_records)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        summaries.sort_by(|a, b| a.entity.cmp(&b.entity));

        let synced = summaries
            .iter()
            .filter(|s| s.status == SyncStatus::Synced)
            .count();
        let records: usize = summaries.iter().map(|s| s.records).sum();
        info!(
            "Synced {}/{} entities, {} records",
            synced,
            summaries.len(),
            records
        );

        summaries
    }
}

/// Outcome of syncing one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Records were fetched (possibly zero)
    Synced,
    /// Required filters were not supplied
    Skipped,
    /// The entity could not be read
    Failed,
}

/// Per-entity summary returned by `sync_all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySyncSummary {
    pub entity: String,
    pub status: SyncStatus,
    pub records: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Fetched records when requested; never serialized
    #[serde(skip)]
    pub items: Vec<Value>,
}

impl EntitySyncSummary {
    fn from_outcome(entity: String, outcome: Result<Vec<Value>>, keep_records: bool) -> Self {
        match outcome {
            Ok(items) => Self {
                entity,
                status: SyncStatus::Synced,
                records: items.len(),
                message: None,
                items: if keep_records { items } else { Vec::new() },
            },
            Err(e @ Error::MissingRequiredFilter { .. }) => Self {
                entity,
                status: SyncStatus::Skipped,
                records: 0,
                message: Some(e.to_string()),
                items: Vec::new(),
            },
            Err(e) => {
                warn!("Sync of entity '{}' failed: {}", entity, e);
                Self {
                    entity,
                    status: SyncStatus::Failed,
                    records: 0,
                    message: Some(e.to_string()),
                    items: Vec::new(),
                }
            }
        }
    }
}
