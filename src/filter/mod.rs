//! Filter translation module
//!
//! Turns caller-supplied `(field, operator, value)` filters into the query
//! parameter map a REST endpoint understands, and checks that every filter
//! an entity requires is present before any request is made.

mod translator;
mod types;

pub use translator::{to_query_map, validate_required};
pub use types::{Filter, FilterOperator, QueryMap};
