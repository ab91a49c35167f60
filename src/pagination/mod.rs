//! Pagination module
//!
//! Supports: None (client-side slicing), Offset, Page Number, Cursor
//!
//! # Overview
//!
//! Callers ask for 1-based pages of a given size. Each strategy turns that
//! request into the query parameters its API understands, clamping the page
//! size to the connector's configured maximum, and `wrap_results` assembles
//! the `PagedResult` envelope returned to the caller.

mod strategies;
mod types;

pub use strategies::{
    CursorPaginator, NoPaginator, OffsetPaginator, PageNumberPaginator, Paginator,
};
pub use types::{
    paginate_locally, wrap_results, PageParams, PagedResult, PaginationConfig,
    DEFAULT_MAX_PAGE_SIZE,
};

#[cfg(test)]
mod tests;
