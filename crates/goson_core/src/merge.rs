//! Partial-update merge of a patch into a stored record.

use crate::error::{CoreError, CoreResult};
use crate::schema::Fields;
use goson_codec::Record;

/// Merges `patch` into `existing` in place.
///
/// The patch must declare exactly the record's key set (order ignored);
/// a narrower or wider type is rejected. Every set field of the patch
/// overwrites the stored value, unset fields leave it untouched. Keys keep
/// their stored position.
///
/// # Errors
///
/// Returns [`CoreError::SchemaMismatch`] if the field sets differ. The
/// record is not modified in that case.
pub fn merge(existing: &mut Record, patch: &Fields) -> CoreResult<()> {
    let same_fields =
        existing.len() == patch.len() && patch.names().all(|name| existing.contains_key(name));
    if !same_fields {
        return Err(CoreError::SchemaMismatch {
            expected: existing.keys().cloned().collect(),
            actual: patch.names().map(str::to_string).collect(),
        });
    }

    for (name, value) in patch.specified() {
        existing.insert(name.to_string(), value.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goson_codec::Value;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Patch {
        a: Option<i64>,
        b: Option<i64>,
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn unset_fields_survive() {
        let mut existing = record(json!({"a": 1, "b": 2}));
        let patch = Fields::inspect(&Patch {
            a: None,
            b: Some(5),
        })
        .unwrap();

        merge(&mut existing, &patch).unwrap();
        assert_eq!(Value::Object(existing), json!({"a": 1, "b": 5}));
    }

    #[test]
    fn explicit_zero_is_written() {
        let mut existing = record(json!({"a": 1, "b": 2}));
        let patch = Fields::inspect(&Patch {
            a: Some(0),
            b: None,
        })
        .unwrap();

        merge(&mut existing, &patch).unwrap();
        assert_eq!(Value::Object(existing), json!({"a": 0, "b": 2}));
    }

    #[test]
    fn field_order_is_ignored() {
        let mut existing = record(json!({"b": 2, "a": 1}));
        let patch = Fields::inspect(&Patch {
            a: Some(7),
            b: None,
        })
        .unwrap();

        merge(&mut existing, &patch).unwrap();
        let keys: Vec<&str> = existing.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(existing["a"], json!(7));
    }

    #[test]
    fn narrower_patch_is_rejected() {
        let mut existing = record(json!({"a": 1, "b": 2, "c": 3}));
        let patch = Fields::inspect(&Patch {
            a: Some(9),
            b: Some(9),
        })
        .unwrap();

        let result = merge(&mut existing, &patch);
        assert!(matches!(result, Err(CoreError::SchemaMismatch { .. })));
        assert_eq!(Value::Object(existing), json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn different_names_are_rejected() {
        let mut existing = record(json!({"a": 1, "x": 2}));
        let patch = Fields::inspect(&Patch {
            a: Some(9),
            b: None,
        })
        .unwrap();

        match merge(&mut existing, &patch) {
            Err(CoreError::SchemaMismatch { expected, actual }) => {
                assert_eq!(expected, vec!["a", "x"]);
                assert_eq!(actual, vec!["a", "b"]);
            }
            other => panic!("Expected schema mismatch, got {other:?}"),
        }
    }
}
