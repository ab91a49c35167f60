//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::PageParams;
use crate::extract::lookup_string;
use crate::filter::QueryMap;
use serde_json::Value;

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Upper bound on page size, if the API imposes one
    fn max_page_size(&self) -> Option<u32>;

    /// Parameters for the 1-based `page_number` of `page_size` records
    ///
    /// `page_number` below 1 is treated as 1 and `page_size` is clamped to
    /// `1..=max_page_size`.
    fn build_page_request(&self, page_number: u32, page_size: u32) -> PageParams;

    /// Whether the API pages on its side; `false` means slice locally
    fn is_server_side(&self) -> bool {
        true
    }

    /// Extract the cursor for the next page from a response body
    fn next_cursor(&self, _body: &Value) -> Option<String> {
        None
    }

    /// Parameters for the page following `cursor`
    fn cursor_request(&self, _params: &PageParams, _cursor: &str) -> Option<PageParams> {
        None
    }

    /// Clamp a requested page size to what the API accepts
    fn clamp(&self, page_size: u32) -> u32 {
        let size = page_size.max(1);
        match self.max_page_size() {
            Some(max) => size.min(max.max(1)),
            None => size,
        }
    }
}

/// Offset of the first record on a 1-based page
fn offset_for(page_number: u32, limit: u32) -> u64 {
    u64::from(page_number.max(1) - 1) * u64::from(limit)
}

// ============================================================================
// No Pagination
// ============================================================================

/// No upstream pagination; the whole result set comes back at once
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn max_page_size(&self) -> Option<u32> {
        None
    }

    fn build_page_request(&self, page_number: u32, page_size: u32) -> PageParams {
        let limit = self.clamp(page_size);
        PageParams {
            query: QueryMap::new(),
            page_number: page_number.max(1),
            limit,
            offset: offset_for(page_number, limit),
        }
    }

    fn is_server_side(&self) -> bool {
        false
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Common patterns:
/// - `?offset=100&limit=50`
/// - `?skip=100&take=50`
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Largest limit the API accepts
    pub max_page_size: u32,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            max_page_size,
        }
    }
}

impl Paginator for OffsetPaginator {
    fn max_page_size(&self) -> Option<u32> {
        Some(self.max_page_size)
    }

    fn build_page_request(&self, page_number: u32, page_size: u32) -> PageParams {
        let limit = self.clamp(page_size);
        let offset = offset_for(page_number, limit);

        let mut query = QueryMap::new();
        query.insert(self.offset_param.as_str(), offset.to_string());
        query.insert(self.limit_param.as_str(), limit.to_string());

        PageParams {
            query,
            page_number: page_number.max(1),
            limit,
            offset,
        }
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Common patterns:
/// - `?page=2&per_page=50`
/// - `?_page=2&_perPage=50`
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// Query parameter name for page size
    pub size_param: String,
    /// Number the API gives its first page
    pub start_page: u32,
    /// Largest page size the API accepts
    pub max_page_size: u32,
}

impl PageNumberPaginator {
    /// Create a new page number paginator starting at page 1
    pub fn new(
        page_param: impl Into<String>,
        size_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            size_param: size_param.into(),
            start_page: 1,
            max_page_size,
        }
    }

    /// Set the API's first page number
    #[must_use]
    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }
}

impl Paginator for PageNumberPaginator {
    fn max_page_size(&self) -> Option<u32> {
        Some(self.max_page_size)
    }

    fn build_page_request(&self, page_number: u32, page_size: u32) -> PageParams {
        let page_number = page_number.max(1);
        let limit = self.clamp(page_size);
        let upstream_page = self.start_page.saturating_add(page_number - 1);

        let mut query = QueryMap::new();
        query.insert(self.page_param.as_str(), upstream_page.to_string());
        query.insert(self.size_param.as_str(), limit.to_string());

        PageParams {
            query,
            page_number,
            limit,
            offset: offset_for(page_number, limit),
        }
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (e.g., Slack)
///
/// The first page carries only the limit; each later page carries the
/// token found at `cursor_path` in the previous response. Page N is
/// reached by following N-1 tokens.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Dotted path to the next cursor in the response
    pub cursor_path: String,
    /// Query parameter name for the limit
    pub limit_param: String,
    /// Largest limit the API accepts
    pub max_page_size: u32,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        limit_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            limit_param: limit_param.into(),
            max_page_size,
        }
    }
}

impl Paginator for CursorPaginator {
    fn max_page_size(&self) -> Option<u32> {
        Some(self.max_page_size)
    }

    fn build_page_request(&self, page_number: u32, page_size: u32) -> PageParams {
        let limit = self.clamp(page_size);

        let mut query = QueryMap::new();
        query.insert(self.limit_param.as_str(), limit.to_string());

        PageParams {
            query,
            page_number: page_number.max(1),
            limit,
            offset: offset_for(page_number, limit),
        }
    }

    fn next_cursor(&self, body: &Value) -> Option<String> {
        lookup_string(body, &self.cursor_path).filter(|c| !c.is_empty())
    }

    fn cursor_request(&self, params: &PageParams, cursor: &str) -> Option<PageParams> {
        let mut next = params.clone();
        next.query.insert(self.cursor_param.as_str(), cursor);
        Some(next)
    }
}
