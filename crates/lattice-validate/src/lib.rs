//! # Lattice Validation
//!
//! Declarative field validation for the Lattice framework. Validators are
//! fluent builders that accumulate an ordered rule pipeline; the pipeline
//! is declared once per field schema and then applied read-only to any
//! number of request values.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lattice_validate::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("email", StringValidator::new().required().trim().email())
//!     .field("username", StringValidator::new().required().min(3).max(32))
//!     .field("age", NumberValidator::new().integer().min(13.0));
//!
//! match schema.validate(query_params) {
//!     Ok(values) => { /* values carry trimmed/rewritten fields */ }
//!     Err(error) => { /* serialize for a 400 response body */ }
//! }
//! ```
//!
//! ## Semantics
//!
//! - Rules run in declaration order; transform rules (`trim`,
//!   `to_lowercase`, `to_uppercase`) rewrite the working value for every
//!   rule after them, even when a later rule fails.
//! - By default every rule runs and all failures are collected; set
//!   `stop_on_first_error` to stop at the first failure instead.
//! - Validation never panics: a type-mismatched input fails the rule
//!   in-band, and `required` is the only rule that rejects `null`.
//! - Default messages can be overridden per rule with `.message(...)`,
//!   taking a fixed string or a lazily evaluated closure.
//!
//! ## Error Format
//!
//! Aggregated failures serialize to the standard Lattice error shape:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"field": "email", "rule": "email", "message": "Invalid email address"},
//!       {"field": "username", "rule": "min", "message": "String must be at least 3 characters long"}
//!     ]
//!   }
//! }
//! ```

mod error;
mod pipeline;
mod rule;
mod schema;
pub mod validators;


pub use error::{FieldError, ValidationError};
pub use pipeline::{Pipeline, PipelineOptions, RuleFailure, ValidationOutcome};
pub use rule::{CheckFn, CheckResult, FailedMessage, Rule};
pub use schema::{Schema, ValidateValue};
pub use validators::{NumberValidator, StringValidator};

/// Prelude module for validation
pub mod prelude {
    pub use crate::error::{FieldError, ValidationError};
    pub use crate::pipeline::{Pipeline, PipelineOptions, RuleFailure, ValidationOutcome};
    pub use crate::rule::{CheckResult, FailedMessage};
    pub use crate::schema::{Schema, ValidateValue};
    pub use crate::validators::{NumberValidator, StringValidator};
}
