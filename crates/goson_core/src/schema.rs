//! Schema inspection for structured values.
//!
//! A structured value is any `Serialize` type whose serialized form is a
//! JSON object: a struct with named fields, a map, or a [`Record`]. Field
//! names and order come from serde's generated code rather than from any
//! runtime type inspection.
//!
//! Two notions of "empty" are in play:
//!
//! - **unset**: the field serialized to `null`. In patches and filters this
//!   means "not specified"; declare such fields as `Option<T>`.
//! - **zero**: the type's default value (`""`, `0`, `false`, empty
//!   collections, `null`). A field named in [`Structured::NOT_NULL`] must not
//!   be zero when the record is inserted.
//!
//! Only fields that appear in the serialized object exist as far as this
//! module is concerned. Patch and filter types must therefore not use
//! `#[serde(skip_serializing_if = ...)]`: a skipped `None` drops the field
//! from the layout, which changes the field set an update is checked
//! against. Let `None` serialize as `null` instead.

use crate::error::{CoreError, CoreResult};
use goson_codec::{Record, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// A record type with declared field constraints.
///
/// # Example
///
/// ```rust
/// use goson_core::Structured;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     email: String,
///     age: u32,
/// }
///
/// impl Structured for User {
///     const NOT_NULL: &'static [&'static str] = &["name", "email"];
/// }
/// ```
pub trait Structured: Serialize {
    /// Serialized names of fields that carry a not-null constraint.
    ///
    /// A listed field that is absent from the serialized output, for
    /// example because serde skipped it, fails validation like a zero value.
    const NOT_NULL: &'static [&'static str] = &[];
}

impl Structured for Record {}

impl Structured for Value {}

impl<T: Structured> Structured for &T {
    const NOT_NULL: &'static [&'static str] = T::NOT_NULL;
}

/// Per-field constraint metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldConstraint {
    /// Whether the field must hold a non-zero value on insert.
    pub required: bool,
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    value: Value,
    required: bool,
}

/// The inspected field layout of one structured value.
#[derive(Debug, Clone)]
pub struct Fields {
    entries: Vec<Field>,
}

impl Fields {
    /// Inspects a value without constraints (patches, filters).
    ///
    /// The layout holds exactly the serialized fields, so a patch type that
    /// skips `None` fields looks narrower than it is declared.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Schema`] if the value does not serialize to an
    /// object.
    pub fn inspect<T: Serialize + ?Sized>(value: &T) -> CoreResult<Self> {
        Self::build(value, &[])
    }

    /// Inspects a record together with its declared constraints.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Schema`] if the value does not serialize to an
    /// object, and [`CoreError::Validation`] if a not-null field is missing
    /// from the serialized output.
    pub fn inspect_record<T: Structured>(value: &T) -> CoreResult<Self> {
        Self::build(value, T::NOT_NULL)
    }

    fn build<T: Serialize + ?Sized>(value: &T, not_null: &[&str]) -> CoreResult<Self> {
        let map = match goson_codec::to_value(value)? {
            Value::Object(map) => map,
            other => {
                return Err(CoreError::schema(format!(
                    "input must be a structured record, got {}",
                    kind_name(&other)
                )))
            }
        };

        if let Some(missing) = not_null.iter().find(|name| !map.contains_key(**name)) {
            return Err(CoreError::validation(
                *missing,
                format!("please provide \"{missing}\""),
            ));
        }

        let entries = map
            .into_iter()
            .map(|(name, value)| Field {
                required: not_null.contains(&name.as_str()),
                name,
                value,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|f| f.name.as_str())
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the value declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of a declared field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Returns true if the field is unset (or not declared at all).
    #[must_use]
    pub fn is_default(&self, name: &str) -> bool {
        self.value(name).map_or(true, Value::is_null)
    }

    /// Returns true if every field is unset.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.entries.iter().all(|f| f.value.is_null())
    }

    /// Fields that are set, in declaration order.
    pub fn specified(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter(|f| !f.value.is_null())
            .map(|f| (f.name.as_str(), &f.value))
    }

    /// Constraint metadata keyed by field name.
    #[must_use]
    pub fn constraints(&self) -> BTreeMap<&str, FieldConstraint> {
        self.entries
            .iter()
            .map(|f| {
                (
                    f.name.as_str(),
                    FieldConstraint {
                        required: f.required,
                    },
                )
            })
            .collect()
    }

    /// Checks the not-null constraints, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the offending field.
    pub fn validate(&self) -> CoreResult<()> {
        for field in self.entries.iter().filter(|f| f.required) {
            if is_zero_value(&field.value) {
                return Err(CoreError::validation(
                    &field.name,
                    format!("please provide \"{}\"", field.name),
                ));
            }
            if field.value.as_f64().is_some_and(|n| n < 0.0) {
                return Err(CoreError::validation(
                    &field.name,
                    format!("please provide a positive value for \"{}\"", field.name),
                ));
            }
        }
        Ok(())
    }

    /// Converts the inspected value into a generic record.
    #[must_use]
    pub fn into_record(self) -> Record {
        self.entries
            .into_iter()
            .map(|f| (f.name, f.value))
            .collect()
    }
}

/// Returns true if `value` is its type's zero value.
///
/// Objects are zero when all their members are, mirroring a struct whose
/// fields all hold defaults.
#[must_use]
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(is_zero_value),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        name: String,
        email: String,
        age: i32,
    }

    impl Structured for User {
        const NOT_NULL: &'static [&'static str] = &["email", "age"];
    }

    #[derive(Serialize)]
    struct UserPatch {
        name: Option<String>,
        email: Option<String>,
        age: Option<i32>,
    }

    fn user(name: &str, email: &str, age: i32) -> User {
        User {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    #[test]
    fn names_follow_declaration_order() {
        let fields = Fields::inspect(&user("a", "b", 1)).unwrap();
        let names: Vec<&str> = fields.names().collect();
        assert_eq!(names, vec!["name", "email", "age"]);
    }

    #[test]
    fn constraints_mark_not_null_fields() {
        let fields = Fields::inspect_record(&user("a", "b", 1)).unwrap();
        let constraints = fields.constraints();
        assert!(!constraints["name"].required);
        assert!(constraints["email"].required);
        assert!(constraints["age"].required);
    }

    #[test]
    fn non_structured_input_is_schema_error() {
        assert!(matches!(Fields::inspect(&42), Err(CoreError::Schema { .. })));
        assert!(matches!(
            Fields::inspect(&vec!["a", "b"]),
            Err(CoreError::Schema { .. })
        ));
    }

    #[test]
    fn skipped_not_null_field_is_validation_error() {
        #[derive(Serialize)]
        struct Contact {
            name: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
        }
        impl Structured for Contact {
            const NOT_NULL: &'static [&'static str] = &["email"];
        }

        let result = Fields::inspect_record(&Contact {
            name: "a".into(),
            email: None,
        });
        match result {
            Err(CoreError::Validation { field, message }) => {
                assert_eq!(field, "email");
                assert_eq!(message, "please provide \"email\"");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn skipped_patch_fields_leave_the_layout() {
        #[derive(Serialize)]
        struct SkippingPatch {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
        }

        let fields = Fields::inspect(&SkippingPatch {
            name: Some("b".into()),
            email: None,
        })
        .unwrap();
        let names: Vec<&str> = fields.names().collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn validate_names_first_offending_field() {
        let fields = Fields::inspect_record(&user("", "", 0)).unwrap();
        match fields.validate() {
            Err(CoreError::Validation { field, message }) => {
                assert_eq!(field, "email");
                assert_eq!(message, "please provide \"email\"");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_required_numbers() {
        let fields = Fields::inspect_record(&user("", "a@b.c", -3)).unwrap();
        match fields.validate() {
            Err(CoreError::Validation { field, message }) => {
                assert_eq!(field, "age");
                assert!(message.contains("positive"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_complete_record() {
        let fields = Fields::inspect_record(&user("", "a@b.c", 30)).unwrap();
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn optional_fields_are_unset_when_none() {
        let patch = UserPatch {
            name: None,
            email: Some(String::new()),
            age: Some(0),
        };
        let fields = Fields::inspect(&patch).unwrap();

        assert!(fields.is_default("name"));
        assert!(!fields.is_default("email"));
        assert!(!fields.is_default("age"));
        assert!(fields.is_default("missing"));
        assert!(!fields.is_unspecified());

        let specified: Vec<&str> = fields.specified().map(|(name, _)| name).collect();
        assert_eq!(specified, vec!["email", "age"]);
    }

    #[test]
    fn all_none_is_unspecified() {
        let patch = UserPatch {
            name: None,
            email: None,
            age: None,
        };
        assert!(Fields::inspect(&patch).unwrap().is_unspecified());
    }

    #[test]
    fn zero_values() {
        assert!(is_zero_value(&json!(null)));
        assert!(is_zero_value(&json!("")));
        assert!(is_zero_value(&json!(0)));
        assert!(is_zero_value(&json!(0.0)));
        assert!(is_zero_value(&json!(false)));
        assert!(is_zero_value(&json!([])));
        assert!(is_zero_value(&json!({"street": "", "zip": 0})));

        assert!(!is_zero_value(&json!("x")));
        assert!(!is_zero_value(&json!(-1)));
        assert!(!is_zero_value(&json!(true)));
        assert!(!is_zero_value(&json!({"street": "Main"})));
    }

    #[test]
    fn into_record_keeps_order() {
        let record = Fields::inspect(&user("ada", "a@b.c", 36))
            .unwrap()
            .into_record();
        assert_eq!(
            Value::Object(record),
            json!({"name": "ada", "email": "a@b.c", "age": 36})
        );
    }
}
