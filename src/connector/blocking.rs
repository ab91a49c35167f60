//! Blocking adapter over an async connector

use super::{EntityConnector, EntitySyncSummary};
use crate::error::Result;
use crate::extract::EntityStructure;
use crate::filter::Filter;
use crate::pagination::PagedResult;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

/// Runs an `EntityConnector` to completion on its own runtime
///
/// Must not be used from inside another Tokio runtime.
pub struct BlockingConnector<C> {
    inner: C,
    runtime: Runtime,
}

impl<C: EntityConnector> BlockingConnector<C> {
    /// Wrap a connector with a current-thread runtime
    pub fn new(inner: C) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// The wrapped async connector
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn list_entities(&self) -> Vec<String> {
        self.inner.list_entities()
    }

    pub fn get_structure(&self, entity: &str) -> Result<EntityStructure> {
        self.runtime.block_on(self.inner.get_structure(entity))
    }

    pub fn get_entities(&self, entity: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        self.runtime
            .block_on(self.inner.get_entities(entity, filters))
    }

    pub fn get_entities_page(
        &self,
        entity: &str,
        filters: &[Filter],
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult> {
        self.runtime.block_on(
            self.inner
                .get_entities_page(entity, filters, page_number, page_size),
        )
    }

    pub fn sync_all(&self, filters: &[Filter], concurrency: usize) -> Vec<EntitySyncSummary> {
        self.runtime
            .block_on(self.inner.sync_all(filters, concurrency))
    }
}

impl<C: EntityConnector> std::fmt::Debug for BlockingConnector<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingConnector")
            .field("name", &self.inner.name())
            .finish_non_exhaustive()
    }
}
