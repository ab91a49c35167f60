//! Pagination types
//!
//! Configuration, page request parameters, and the paged result envelope.

use super::strategies::{
    CursorPaginator, NoPaginator, OffsetPaginator, PageNumberPaginator, Paginator,
};
use crate::filter::QueryMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default upper bound on page size when a connector does not set one
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Pagination configuration for a connector or entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// The API returns everything; pages are sliced client-side
    #[default]
    None,

    /// Offset/limit parameters (`?offset=100&limit=50`)
    Offset {
        #[serde(default = "default_offset_param")]
        offset_param: String,
        #[serde(default = "default_limit_param")]
        limit_param: String,
        #[serde(default = "default_max_page_size")]
        max_page_size: u32,
    },

    /// Page number parameters (`?page=3&per_page=50`)
    PageNumber {
        #[serde(default = "default_page_param")]
        page_param: String,
        #[serde(default = "default_size_param")]
        size_param: String,
        /// Number the API gives its first page (usually 1, sometimes 0)
        #[serde(default = "default_start_page")]
        start_page: u32,
        #[serde(default = "default_max_page_size")]
        max_page_size: u32,
    },

    /// Opaque cursor tokens read from the response body
    Cursor {
        #[serde(default = "default_cursor_param")]
        cursor_param: String,
        /// Dotted path to the next cursor in the response
        cursor_path: String,
        #[serde(default = "default_limit_param")]
        limit_param: String,
        #[serde(default = "default_max_page_size")]
        max_page_size: u32,
    },
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_size_param() -> String {
    "per_page".to_string()
}

fn default_cursor_param() -> String {
    "cursor".to_string()
}

fn default_start_page() -> u32 {
    1
}

fn default_max_page_size() -> u32 {
    DEFAULT_MAX_PAGE_SIZE
}

impl PaginationConfig {
    /// Create offset pagination config
    pub fn offset(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self::Offset {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            max_page_size,
        }
    }

    /// Create page number pagination config
    pub fn page_number(
        page_param: impl Into<String>,
        size_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self::PageNumber {
            page_param: page_param.into(),
            size_param: size_param.into(),
            start_page: 1,
            max_page_size,
        }
    }

    /// Create cursor pagination config
    pub fn cursor(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        limit_param: impl Into<String>,
        max_page_size: u32,
    ) -> Self {
        Self::Cursor {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            limit_param: limit_param.into(),
            max_page_size,
        }
    }

    /// Build the paginator for this configuration
    pub fn paginator(&self) -> Box<dyn Paginator> {
        match self {
            PaginationConfig::None => Box::new(NoPaginator),
            PaginationConfig::Offset {
                offset_param,
                limit_param,
                max_page_size,
            } => Box::new(OffsetPaginator::new(
                offset_param.as_str(),
                limit_param.as_str(),
                *max_page_size,
            )),
            PaginationConfig::PageNumber {
                page_param,
                size_param,
                start_page,
                max_page_size,
            } => Box::new(
                PageNumberPaginator::new(page_param.as_str(), size_param.as_str(), *max_page_size)
                    .with_start_page(*start_page),
            ),
            PaginationConfig::Cursor {
                cursor_param,
                cursor_path,
                limit_param,
                max_page_size,
            } => Box::new(CursorPaginator::new(
                cursor_param.as_str(),
                cursor_path.as_str(),
                limit_param.as_str(),
                *max_page_size,
            )),
        }
    }
}

/// Parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageParams {
    /// Query parameters to add to the request
    pub query: QueryMap,
    /// 1-based page number
    pub page_number: u32,
    /// Effective page size after clamping
    pub limit: u32,
    /// Number of records before this page
    pub offset: u64,
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult {
    /// Records on this page
    pub items: Vec<Value>,
    /// 1-based page number
    pub page_number: u32,
    /// Effective page size
    pub page_size: u32,
    /// Total pages; 1 when the upstream did not report a total
    pub total_pages: u64,
    /// Total records; the page length when the upstream did not report a total
    pub total_records: u64,
    /// Whether the totals came from the upstream API
    pub total_known: bool,
    /// Cursor for the following page, for cursor-paginated APIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl PagedResult {
    /// An empty page
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        wrap_results(Vec::new(), page_number, page_size, None)
    }

    /// Attach the next cursor
    #[must_use]
    pub fn with_next_cursor(mut self, cursor: Option<String>) -> Self {
        self.next_cursor = cursor;
        self
    }
}

/// Wrap a page of records in a `PagedResult`
///
/// Without a known total, `total_pages` is 1 and `total_records` is the
/// page length. Those values only describe this page and are flagged with
/// `total_known = false`.
pub fn wrap_results(
    items: Vec<Value>,
    page_number: u32,
    page_size: u32,
    known_total: Option<u64>,
) -> PagedResult {
    let (total_pages, total_records, total_known) = match known_total {
        Some(total) => {
            let size = u64::from(page_size.max(1));
            (total.div_ceil(size).max(1), total, true)
        }
        None => (1, items.len() as u64, false),
    };

    PagedResult {
        items,
        page_number: page_number.max(1),
        page_size,
        total_pages,
        total_records,
        total_known,
        next_cursor: None,
    }
}

/// Slice a full result set into one page
///
/// Used when the API has no pagination of its own; the total is exact.
pub fn paginate_locally(records: Vec<Value>, params: &PageParams) -> PagedResult {
    let total = records.len() as u64;
    let items = records
        .into_iter()
        .skip(usize::try_from(params.offset).unwrap_or(usize::MAX))
        .take(params.limit as usize)
        .collect();

    wrap_results(items, params.page_number, params.limit, Some(total))
}
