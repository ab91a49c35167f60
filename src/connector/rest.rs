//! REST entity connector
//!
//! Resolves an entity to its endpoint, turns filters into path and query
//! parameters, issues GETs through the transport, and pulls the record
//! array out of each JSON body. `get_entities` follows upstream pages until
//! a short or empty page, the reported total, or the last cursor.

use super::EntityConnector;
use crate::config::ConnectorDefinition;
use crate::error::{Error, Result};
use crate::extract::{extract_array, infer_schema, lookup_u64, EntityStructure};
use crate::filter::{to_query_map, validate_required, Filter, QueryMap};
use crate::http::{HttpClient, Transport};
use crate::mapping::{EndpointResolver, EntityMapping};
use crate::pagination::{
    paginate_locally, wrap_results, PagedResult, PaginationConfig, DEFAULT_MAX_PAGE_SIZE,
};
use crate::template::{self, TemplateContext};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on upstream pages followed by one `get_entities` call
const MAX_PAGES: usize = 10_000;

/// A request ready to send, minus paging parameters
#[derive(Debug)]
struct PreparedRequest<'a> {
    mapping: &'a EntityMapping,
    path: String,
    query: QueryMap,
}

/// Connector for a JSON REST API described by an entity table
pub struct RestConnector<T: Transport = HttpClient> {
    name: String,
    resolver: Arc<EndpointResolver>,
    pagination: PaginationConfig,
    transport: T,
}

impl<T: Transport> RestConnector<T> {
    /// Create a connector over an existing transport
    pub fn new(
        name: impl Into<String>,
        resolver: impl Into<Arc<EndpointResolver>>,
        pagination: PaginationConfig,
        transport: T,
    ) -> Self {
        Self {
            name: name.into(),
            resolver: resolver.into(),
            pagination,
            transport,
        }
    }

    /// The entity table
    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe an entity by sampling it with the given filters
    ///
    /// Declared fields win over a sample call.
    pub async fn get_structure_with(
        &self,
        entity: &str,
        filters: &[Filter],
    ) -> Result<EntityStructure> {
        let mapping = self.resolver.resolve(entity)?;
        if !mapping.fields.is_empty() {
            let mut structure = EntityStructure::new(&mapping.name);
            structure.fields.clone_from(&mapping.fields);
            return Ok(structure);
        }

        let page = self.get_entities_page(entity, filters, 1, 1).await?;
        Ok(infer_schema(&mapping.name, &page.items))
    }

    fn pagination_for<'a>(&'a self, mapping: &'a EntityMapping) -> &'a PaginationConfig {
        mapping.pagination.as_ref().unwrap_or(&self.pagination)
    }

    /// Resolve, validate, and substitute; fails before any network call
    fn prepare(&self, entity: &str, filters: &[Filter]) -> Result<PreparedRequest<'_>> {
        let mapping = self.resolver.resolve(entity)?;
        let mut filters = to_query_map(filters);

        validate_required(&mapping.name, &filters, &mapping.required_filters)?;
        let path = mapping.endpoint_url(&filters)?;

        for placeholder in template::placeholders(&mapping.endpoint) {
            filters.remove(&placeholder);
        }

        let mut query: QueryMap = mapping
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.merge(filters);

        Ok(PreparedRequest {
            mapping,
            path,
            query,
        })
    }

    /// Issue the GET and parse the body
    ///
    /// Upstream and parse failures are logged and come back as `None`.
    /// Configuration errors raised by the transport are returned.
    async fn fetch(&self, entity: &str, path: &str, query: &QueryMap) -> Result<Option<Value>> {
        debug!(
            "Fetching entity '{}' from {} ({} params)",
            entity,
            path,
            query.len()
        );

        let response = match self.transport.get(path, query).await {
            Ok(response) => response,
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => {
                warn!("Entity '{}' request to {} failed: {}", entity, path, e);
                return Ok(None);
            }
        };

        if !response.is_success() {
            let err = Error::upstream(response.status, response.body);
            warn!("Entity '{}' request to {} failed: {}", entity, path, err);
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                let err = Error::malformed(e.to_string());
                warn!("Entity '{}' response from {} ignored: {}", entity, path, err);
                Ok(None)
            }
        }
    }
}

impl RestConnector<HttpClient> {
    /// Build a connector from a definition and the connection config JSON
    ///
    /// Renders `{{ config.* }}` templates in the base URL, auth, headers,
    /// and static entity params.
    pub fn from_definition(def: &ConnectorDefinition, connection_config: &Value) -> Result<Self> {
        let ctx = TemplateContext::with_config(connection_config.clone());

        let client_config = def.client_config(&ctx)?;
        let auth = def.auth.render(&ctx)?;
        let client = HttpClient::with_auth(client_config, auth)?;

        let mut entities = def.entities.clone();
        for entity in &mut entities {
            for value in entity.params.values_mut() {
                *value = template::render(value, &ctx)?;
            }
        }

        Ok(Self::new(
            def.name.clone(),
            EndpointResolver::new(entities)?,
            def.pagination.clone(),
            client,
        ))
    }
}

#[async_trait]
impl<T: Transport> EntityConnector for RestConnector<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_entities(&self) -> Vec<String> {
        self.resolver.entity_names()
    }

    async fn get_structure(&self, entity: &str) -> Result<EntityStructure> {
        self.get_structure_with(entity, &[]).await
    }

    async fn get_entities(&self, entity: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        let request = self.prepare(entity, filters)?;
        let mapping = request.mapping;
        let pagination = self.pagination_for(mapping);
        let paginator = pagination.paginator();

        if !paginator.is_server_side() {
            return Ok(self
                .fetch(&mapping.name, &request.path, &request.query)
                .await?
                .map(|b| extract_array(&b, &mapping.root_path))
                .unwrap_or_default());
        }

        let is_cursor = matches!(pagination, PaginationConfig::Cursor { .. });
        let page_size = paginator.max_page_size().unwrap_or(DEFAULT_MAX_PAGE_SIZE);
        let mut params = paginator.build_page_request(1, page_size);
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for _ in 0..MAX_PAGES {
            let mut query = request.query.clone();
            query.merge(params.query.clone());

            // A failed page ends the walk; earlier pages are kept
            let Some(body) = self.fetch(&mapping.name, &request.path, &query).await? else {
                return Ok(records);
            };

            let items = extract_array(&body, &mapping.root_path);
            let fetched = items.len();
            records.extend(items);

            let total = mapping
                .total_path
                .as_deref()
                .and_then(|path| lookup_u64(&body, path));
            if fetched == 0 || total.is_some_and(|t| records.len() as u64 >= t) {
                return Ok(records);
            }

            let next = if is_cursor {
                paginator
                    .next_cursor(&body)
                    .filter(|cursor| seen_cursors.insert(cursor.clone()))
                    .and_then(|cursor| paginator.cursor_request(&params, &cursor))
            } else if fetched < params.limit as usize {
                None
            } else {
                Some(paginator.build_page_request(params.page_number.saturating_add(1), page_size))
            };

            match next {
                Some(next) => params = next,
                None => return Ok(records),
            }
        }

        warn!(
            "Entity '{}' stopped after {} pages ({} records)",
            mapping.name,
            MAX_PAGES,
            records.len()
        );
        Ok(records)
    }

    async fn get_entities_page(
        &self,
        entity: &str,
        filters: &[Filter],
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult> {
        let request = self.prepare(entity, filters)?;
        let mapping = request.mapping;
        let pagination = self.pagination_for(mapping);
        let paginator = pagination.paginator();

        let mut params = paginator.build_page_request(page_number, page_size);

        if !paginator.is_server_side() {
            let records = self
                .fetch(&mapping.name, &request.path, &request.query)
                .await?
                .map(|b| extract_array(&b, &mapping.root_path))
                .unwrap_or_default();
            return Ok(paginate_locally(records, &params));
        }

        let walk_cursor = matches!(pagination, PaginationConfig::Cursor { .. });
        let mut page = 1;

        loop {
            let mut query = request.query.clone();
            query.merge(params.query.clone());

            let Some(body) = self.fetch(&mapping.name, &request.path, &query).await? else {
                return Ok(PagedResult::empty(params.page_number, params.limit));
            };

            let next_cursor = paginator.next_cursor(&body);

            if walk_cursor && page < params.page_number {
                let next = next_cursor
                    .as_deref()
                    .and_then(|cursor| paginator.cursor_request(&params, cursor));
                match next {
                    Some(next) => {
                        params.query = next.query;
                        page += 1;
                        continue;
                    }
                    None => {
                        debug!(
                            "Entity '{}' ran out of cursor pages at page {}",
                            mapping.name, page
                        );
                        return Ok(PagedResult::empty(params.page_number, params.limit));
                    }
                }
            }

            let items = extract_array(&body, &mapping.root_path);
            let total = mapping
                .total_path
                .as_deref()
                .and_then(|path| lookup_u64(&body, path));

            return Ok(
                wrap_results(items, params.page_number, params.limit, total)
                    .with_next_cursor(next_cursor),
            );
        }
    }
}

impl<T: Transport> std::fmt::Debug for RestConnector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConnector")
            .field("name", &self.name)
            .field("entities", &self.resolver.entity_names())
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
