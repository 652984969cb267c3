//! Field filters applied to the serialised form of aggregates.

use serde_json::Value;
use std::collections::BTreeMap;

/// Conjunction of field filters.
///
/// Field names are the camelCase keys of the boundary representation. A
/// filter matches when the field equals the expected value, or when the
/// field is an array containing it. An empty set of filters matches every
/// aggregate.
///
/// # Examples
///
/// ```
/// use atelier::repository::ports::Criteria;
/// use serde_json::json;
///
/// let criteria = Criteria::all().with_field("state", "ready");
/// assert!(criteria.matches(&json!({ "state": "ready", "title": "x" })));
/// assert!(!criteria.matches(&json!({ "state": "open" })));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    filters: BTreeMap<String, Value>,
}

impl Criteria {
    /// Returns criteria that match every aggregate.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds an equality filter on a serialised field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Returns whether no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns whether a serialised aggregate satisfies every filter.
    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| field_matches(record.get(field), expected))
    }
}

fn field_matches(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
        Some(value) => value == expected,
        None => expected.is_null(),
    }
}
