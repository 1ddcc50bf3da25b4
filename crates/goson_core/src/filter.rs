//! Equality filters over generic records.

use crate::error::CoreResult;
use crate::schema::Fields;
use goson_codec::{Record, Value};
use serde::Serialize;

/// A conjunction of `field == value` constraints.
///
/// Built from the set fields of a filter value; unset (`None`) fields
/// impose nothing. Values compare by deep equality, so nested objects must
/// match member for member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    constraints: Vec<(String, Value)>,
}

impl Filter {
    /// Builds a filter from a structured filter value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Schema`] if the value is not structured.
    pub fn new<T: Serialize + ?Sized>(filter: &T) -> CoreResult<Self> {
        Ok(Self::from_fields(&Fields::inspect(filter)?))
    }

    /// Builds a filter from already inspected fields.
    #[must_use]
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            constraints: fields
                .specified()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    /// Returns true if the filter constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The `(field, expected value)` pairs.
    #[must_use]
    pub fn constraints(&self) -> &[(String, Value)] {
        &self.constraints
    }

    /// Returns true if `record` holds every constrained field with an
    /// equal value.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(name, expected)| record.get(name) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Default)]
    struct UserFilter {
        name: Option<String>,
        age: Option<u32>,
        address: Option<Value>,
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn default_filter_is_empty() {
        let filter = Filter::new(&UserFilter::default()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&record(json!({"anything": 1}))));
    }

    #[test]
    fn all_constraints_must_hold() {
        let filter = Filter::new(&UserFilter {
            name: Some("ada".into()),
            age: Some(36),
            ..Default::default()
        })
        .unwrap();

        assert!(filter.matches(&record(json!({"name": "ada", "age": 36, "x": true}))));
        assert!(!filter.matches(&record(json!({"name": "ada", "age": 37}))));
        assert!(!filter.matches(&record(json!({"name": "ada"}))));
    }

    #[test]
    fn explicit_zero_constrains() {
        let filter = Filter::new(&UserFilter {
            age: Some(0),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(filter.constraints().len(), 1);
        assert!(filter.matches(&record(json!({"age": 0}))));
        assert!(!filter.matches(&record(json!({"age": 1}))));
    }

    #[test]
    fn nested_values_compare_deeply() {
        let filter = Filter::new(&UserFilter {
            address: Some(json!({"city": "Oslo", "zip": "0150"})),
            ..Default::default()
        })
        .unwrap();

        assert!(filter.matches(&record(
            json!({"address": {"city": "Oslo", "zip": "0150"}})
        )));
        assert!(!filter.matches(&record(json!({"address": {"city": "Oslo"}}))));
    }

    #[test]
    fn string_and_number_do_not_mix() {
        let filter = Filter::new(&json!({"age": "36"})).unwrap();
        assert!(!filter.matches(&record(json!({"age": 36}))));
    }
}
