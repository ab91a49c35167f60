//! Filter and query map types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Filter Operator
// ============================================================================

/// Comparison operator attached to a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
}

impl FilterOperator {
    /// Symbols accepted inline in `field<op>value` expressions, longest first
    const INLINE: [(&'static str, FilterOperator); 6] = [
        (">=", FilterOperator::Gte),
        ("<=", FilterOperator::Lte),
        ("!=", FilterOperator::Ne),
        ("=", FilterOperator::Eq),
        (">", FilterOperator::Gt),
        ("<", FilterOperator::Lt),
    ];

    /// The canonical symbol for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "like",
            FilterOperator::In => "in",
        }
    }

    /// Whether this is a plain equality match
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOperator::Eq)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Ok(FilterOperator::Eq),
            "!=" | "<>" | "ne" => Ok(FilterOperator::Ne),
            ">" | "gt" => Ok(FilterOperator::Gt),
            ">=" | "gte" => Ok(FilterOperator::Gte),
            "<" | "lt" => Ok(FilterOperator::Lt),
            "<=" | "lte" => Ok(FilterOperator::Lte),
            "like" | "contains" => Ok(FilterOperator::Like),
            "in" => Ok(FilterOperator::In),
            other => Err(Error::InvalidFilter {
                message: format!("unknown operator '{other}'"),
            }),
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// A caller-supplied filter narrowing a query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filter {
    /// Field (parameter) name
    pub field: String,
    /// Comparison operator
    #[serde(default)]
    pub operator: FilterOperator,
    /// Filter value; `None` filters are ignored
    #[serde(default)]
    pub value: Option<String>,
}

impl Filter {
    /// Create an equality filter
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Eq,
            value: Some(value.into()),
        }
    }

    /// Create a filter with an explicit operator
    pub fn with_operator(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
        }
    }

    /// Create a filter without a value
    pub fn unset(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Eq,
            value: None,
        }
    }
}

/// Parses `field=value`, `field>=value`, and the other inline operators
impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let found = FilterOperator::INLINE
            .iter()
            .filter_map(|(symbol, op)| s.find(symbol).map(|pos| (pos, *symbol, *op)))
            .min_by_key(|(pos, symbol, _)| (*pos, std::cmp::Reverse(symbol.len())));

        let Some((pos, symbol, operator)) = found else {
            return Err(Error::InvalidFilter {
                message: format!("expected field<op>value, got '{s}'"),
            });
        };

        let field = s[..pos].trim();
        if field.is_empty() {
            return Err(Error::InvalidFilter {
                message: format!("missing field name in '{s}'"),
            });
        }

        Ok(Filter::with_operator(
            field,
            operator,
            s[pos + symbol.len()..].trim(),
        ))
    }
}

// ============================================================================
// Query Map
// ============================================================================

/// Query parameters keyed case-insensitively
///
/// Lookups ignore ASCII case; iteration yields the key as it was last
/// inserted so the wire keeps the caller's spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: BTreeMap<String, (String, String)>,
}

impl QueryMap {
    /// Create an empty query map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        self.entries
            .insert(key.to_ascii_lowercase(), (key, value.into()))
            .map(|(_, old)| old)
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries
            .remove(&key.to_ascii_lowercase())
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another map into this one; `other` wins on conflicts
    pub fn merge(&mut self, other: QueryMap) {
        self.entries.extend(other.entries);
    }

    /// Pairs in a form reqwest can serialize as a query string
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries.values().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
