//! Transport abstraction

use crate::error::Result;
use crate::filter::QueryMap;
use async_trait::async_trait;
use std::sync::Arc;

/// Raw response from a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP GET used by connectors
///
/// Implementations own connection pooling, retries, and auth. `url` may be
/// relative to a base URL the transport knows about.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request
    async fn get(&self, url: &str, query: &QueryMap) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, query: &QueryMap) -> Result<TransportResponse> {
        (**self).get(url, query).await
    }
}
