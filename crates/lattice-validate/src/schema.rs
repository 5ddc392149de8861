//! Request-level aggregation: an ordered mapping of field names to
//! validators, run against a parsed query/body object.

use crate::error::{FieldError, ValidationError};
use crate::pipeline::ValidationOutcome;
use serde_json::{Map, Value};
use std::fmt;

/// Object-safe entry point implemented by every typed validator family.
///
/// The request layer only sees this trait: it hands each field's raw
/// value to the validator and receives the full pipeline outcome back.
pub trait ValidateValue: Send + Sync {
    /// Run the validator's pipeline against one value.
    fn validate_value(&self, value: &Value) -> ValidationOutcome;
}

/// An ordered set of named field validators.
///
/// Declared once per endpoint, then applied read-only to any number of
/// requests. Field order is preserved: failures surface in declaration
/// order, fields first, rules within a field second.
#[derive(Default)]
pub struct Schema {
    fields: Vec<(String, Box<dyn ValidateValue>)>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator for a field.
    pub fn field(mut self, name: impl Into<String>, validator: impl ValidateValue + 'static) -> Self {
        self.fields.push((name.into(), Box::new(validator)));
        self
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a parsed object (query parameters or request body).
    ///
    /// Fields absent from `source` are validated as `null`, so `required`
    /// catches both missing and explicit-null inputs. On success the
    /// returned map carries each field's final value, including rewrites
    /// from transform rules; on failure every field error is aggregated
    /// into one [`ValidationError`].
    pub fn validate(&self, source: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        let mut output = Map::new();
        let mut errors = ValidationError::new(Vec::new());

        for (name, validator) in &self.fields {
            let raw = source.get(name).cloned().unwrap_or(Value::Null);
            let outcome = validator.validate_value(&raw);

            for failure in &outcome.failures {
                errors.add(FieldError::new(
                    name.clone(),
                    failure.rule.clone(),
                    failure.message.clone(),
                ));
            }
            output.insert(name.clone(), outcome.value);
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            tracing::debug!(fields = errors.len(), "schema validation failed");
            Err(errors)
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{NumberValidator, StringValidator};
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn valid_input_returns_final_values() {
        let schema = Schema::new()
            .field("name", StringValidator::new().required().trim().min(2))
            .field("age", NumberValidator::new().required().min(0.0));

        let source = as_map(json!({"name": "  ada  ", "age": 36}));
        let output = schema.validate(&source).unwrap();

        assert_eq!(output["name"], json!("ada"));
        assert_eq!(output["age"], json!(36));
    }

    #[test]
    fn missing_field_validates_as_null() {
        let schema = Schema::new().field("name", StringValidator::new().required());

        let source = as_map(json!({}));
        let error = schema.validate(&source).unwrap_err();
        assert_eq!(error.fields[0].field, "name");
        assert_eq!(error.fields[0].rule, "required");
    }

    #[test]
    fn errors_keep_field_declaration_order() {
        let schema = Schema::new()
            .field("first", StringValidator::new().min(10))
            .field("second", StringValidator::new().min(10));

        let source = as_map(json!({"first": "a", "second": "b"}));
        let error = schema.validate(&source).unwrap_err();
        let fields: Vec<_> = error.fields.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["first", "second"]);
    }

    #[test]
    fn optional_field_passes_when_absent() {
        // No required rule: the other rules fail on null because null is
        // not a string, which is the documented contract. A field meant
        // to be optional is simply declared without constraints that
        // reject null, or guarded by required when it must be present.
        let schema = Schema::new().field("nickname", StringValidator::new());

        let source = as_map(json!({}));
        let output = schema.validate(&source).unwrap();
        assert_eq!(output["nickname"], json!(null));
    }
}
