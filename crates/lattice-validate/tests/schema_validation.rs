//! End-to-end tests for schema-level validation, exercising the engine
//! the way the request layer consumes it.

use lattice_validate::prelude::*;
use serde_json::{json, Map, Value};

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn signup_schema() -> Schema {
    Schema::new()
        .field(
            "email",
            StringValidator::new().required().trim().to_lowercase().email(),
        )
        .field(
            "username",
            StringValidator::new().required().trim().min(3).max(32),
        )
        .field("age", NumberValidator::new().integer().min(13.0))
}

#[test]
fn valid_signup_passes_and_rewrites() {
    let source = as_map(json!({
        "email": "  Ada@Example.COM ",
        "username": " ada ",
        "age": 36
    }));

    let values = signup_schema().validate(&source).unwrap();
    assert_eq!(values["email"], json!("ada@example.com"));
    assert_eq!(values["username"], json!("ada"));
    assert_eq!(values["age"], json!(36));
}

#[test]
fn invalid_signup_aggregates_in_declaration_order() {
    let source = as_map(json!({
        "email": "not-an-email",
        "username": "ab",
        "age": 14.5
    }));

    let error = signup_schema().validate(&source).unwrap_err();
    let entries: Vec<_> = error
        .fields
        .iter()
        .map(|e| (e.field.as_str(), e.rule.as_str()))
        .collect();
    assert_eq!(
        entries,
        [
            ("email", "email"),
            ("username", "min"),
            ("age", "integer"),
        ]
    );
}

#[test]
fn error_serializes_to_wire_format() {
    let source = as_map(json!({ "age": 36 }));

    let error = signup_schema().validate(&source).unwrap_err();
    let body = serde_json::to_value(&error).unwrap();

    assert_eq!(body["error"]["type"], json!("validation_error"));
    assert_eq!(body["error"]["message"], json!("Validation failed"));

    let fields = body["error"]["fields"].as_array().unwrap();
    assert!(fields
        .iter()
        .any(|f| f["field"] == json!("email") && f["rule"] == json!("required")));
    assert!(fields
        .iter()
        .any(|f| f["field"] == json!("username") && f["rule"] == json!("required")));
}

// The canonical chained-pipeline scenario: trim rewrites before min
// measures, and the rewritten value survives the failure.
#[test]
fn chained_pipeline_scenario() {
    let validator = StringValidator::new().required().trim().min(3).max(10);
    let outcome = validator.validate(&json!("  hi  "));

    assert!(!outcome.is_valid);
    assert_eq!(outcome.value, json!("hi"));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].rule, "min");
    assert_eq!(
        outcome.failures[0].message,
        "String must be at least 3 characters long"
    );
}

#[test]
fn custom_messages_surface_in_field_errors() {
    let schema = Schema::new().field(
        "username",
        StringValidator::new()
            .required()
            .message("Please pick a username")
            .min(3)
            .message("Usernames need at least 3 characters"),
    );

    let error = schema.validate(&as_map(json!({}))).unwrap_err();
    let messages: Vec<_> = error.fields.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Please pick a username",
            "Usernames need at least 3 characters",
        ]
    );
}

#[test]
fn stop_on_first_error_limits_field_errors() {
    let schema = Schema::new().field(
        "username",
        StringValidator::new()
            .stop_on_first_error(true)
            .required()
            .min(3)
            .email(),
    );

    let error = schema.validate(&as_map(json!({}))).unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.fields[0].rule, "required");
}

#[test]
fn rewritten_values_returned_even_for_invalid_requests() {
    let schema = Schema::new()
        .field("name", StringValidator::new().trim().min(10))
        .field("slug", StringValidator::new().to_lowercase());

    let source = as_map(json!({ "name": "  short  ", "slug": "MY-POST" }));
    let error = schema.validate(&source).unwrap_err();
    assert_eq!(error.fields[0].rule, "min");
    // Failure path only exposes the error; the success path carries the
    // rewritten values.
    let ok = Schema::new()
        .field("slug", StringValidator::new().to_lowercase())
        .validate(&as_map(json!({ "slug": "MY-POST" })))
        .unwrap();
    assert_eq!(ok["slug"], json!("my-post"));
}
