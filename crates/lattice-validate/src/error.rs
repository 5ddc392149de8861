//! Aggregated validation error types and the JSON error format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field name that failed validation
    pub field: String,
    /// The rule that failed (e.g. "email", "min", "required")
    pub rule: String,
    /// Rendered, human-readable failure message
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Internal error structure for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    fields: Vec<FieldError>,
}

/// Wrapper for the error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// Validation error aggregating every field failure for one request.
///
/// Field errors keep declaration order (fields in schema order, rules in
/// chain order within a field) so user-facing error ordering is stable.
/// Serializes to the standard Lattice error format:
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Validation failed",
///     "fields": [
///       {"field": "email", "rule": "email", "message": "Invalid email address"}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Error)]
#[error("{}: {} field error(s)", .message, .fields.len())]
pub struct ValidationError {
    /// Ordered collection of field-level validation errors
    pub fields: Vec<FieldError>,
    /// Top-level error message (default: "Validation failed")
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error with field errors.
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            message: "Validation failed".to_string(),
        }
    }

    /// Create a validation error with a custom top-level message.
    pub fn with_message(fields: Vec<FieldError>, message: impl Into<String>) -> Self {
        Self {
            fields,
            message: message.into(),
        }
    }

    /// Create a validation error for a single field.
    pub fn field(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(vec![FieldError::new(field, rule, message)])
    }

    /// Check if there are any field errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of field errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Append a field error.
    pub fn add(&mut self, error: FieldError) {
        self.fields.push(error);
    }

    /// Errors recorded for one field, in rule declaration order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.fields.iter().filter(move |e| e.field == field)
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wrapper = ErrorWrapper {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: self.message.clone(),
                fields: self.fields.clone(),
            },
        };
        wrapper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wrapper = ErrorWrapper::deserialize(deserializer)?;
        Ok(Self {
            fields: wrapper.error.fields,
            message: wrapper.error.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_creation() {
        let error = FieldError::new("email", "email", "Invalid email address");
        assert_eq!(error.field, "email");
        assert_eq!(error.rule, "email");
        assert_eq!(error.message, "Invalid email address");
    }

    #[test]
    fn validation_error_serialization() {
        let error = ValidationError::new(vec![FieldError::new(
            "email",
            "email",
            "Invalid email address",
        )]);

        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["message"], "Validation failed");
        assert_eq!(json["error"]["fields"][0]["field"], "email");
        assert_eq!(json["error"]["fields"][0]["rule"], "email");
    }

    #[test]
    fn validation_error_roundtrip() {
        let error = ValidationError::new(vec![
            FieldError::new("email", "email", "Invalid email address"),
            FieldError::new("name", "min", "String must be at least 3 characters long"),
        ]);

        let json = serde_json::to_string(&error).unwrap();
        let parsed: ValidationError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.fields, error.fields);
        assert_eq!(parsed.message, error.message);
    }

    #[test]
    fn validation_error_display() {
        let error = ValidationError::new(vec![
            FieldError::new("email", "email", "Invalid email address"),
            FieldError::new("age", "min", "Too small"),
        ]);

        assert_eq!(error.to_string(), "Validation failed: 2 field error(s)");
    }

    #[test]
    fn field_errors_keep_order() {
        let mut error = ValidationError::new(Vec::new());
        error.add(FieldError::new("name", "trim", "This field is not a string."));
        error.add(FieldError::new("name", "min", "String must be at least 3 characters long"));

        let rules: Vec<_> = error.for_field("name").map(|e| e.rule.as_str()).collect();
        assert_eq!(rules, ["trim", "min"]);
    }
}
