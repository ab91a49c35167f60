//! Filter to query-parameter translation

use super::types::{Filter, QueryMap};
use crate::error::{Error, Result};
use tracing::debug;

/// Build a query map from filters
///
/// Filters with an empty field name or no value are skipped. REST endpoints
/// only take `name=value` parameters, so every operator contributes its value
/// under the field name; non-equality operators are logged.
pub fn to_query_map(filters: &[Filter]) -> QueryMap {
    let mut query = QueryMap::new();

    for filter in filters {
        let field = filter.field.trim();
        let Some(value) = &filter.value else {
            continue;
        };
        if field.is_empty() {
            continue;
        }

        if !filter.operator.is_equality() {
            debug!(
                "Filter '{}' uses operator '{}', sending as a plain parameter",
                field, filter.operator
            );
        }

        query.insert(field, value.as_str());
    }

    query
}

/// Check that every required filter is present
///
/// Reports all missing names at once, in the order they were declared.
pub fn validate_required(entity: &str, query: &QueryMap, required: &[String]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !query.contains_key(name))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::missing_filters(entity, missing))
    }
}
