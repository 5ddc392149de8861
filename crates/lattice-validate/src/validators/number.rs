//! The number validator family.
//!
//! Same composition pattern as the string family: one owned [`Pipeline`],
//! one rule per constraint method. Non-number inputs fail the rule rather
//! than panicking.

use crate::pipeline::{Pipeline, PipelineOptions, ValidationOutcome};
use crate::rule::{CheckResult, FailedMessage};
use crate::schema::ValidateValue;
use serde_json::Value;
use std::borrow::Cow;

/// Fluent builder for numeric field validation.
#[derive(Debug, Default)]
pub struct NumberValidator {
    pipeline: Pipeline,
}

impl NumberValidator {
    /// Create a validator with no rules and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with the given execution options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            pipeline: Pipeline::with_options(options),
        }
    }

    /// Stop at the first failing rule instead of accumulating every
    /// failure.
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        let mut options = self.pipeline.options();
        options.stop_on_first_error = stop;
        self.pipeline.set_options(options);
        self
    }

    /// Override the failure message of the most recently added rule.
    pub fn message(mut self, message: impl Into<FailedMessage>) -> Self {
        self.pipeline.override_last_message(message.into());
        self
    }

    /// Append a custom rule.
    pub fn add_rule<C>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        check: C,
        failed_message: impl Into<FailedMessage>,
    ) -> Self
    where
        C: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        self.pipeline.add_rule(name, check, failed_message);
        self
    }

    /// Run the full rule chain against a value.
    pub fn validate(&self, value: &Value) -> ValidationOutcome {
        self.pipeline.validate(value)
    }

    fn rule<C>(
        mut self,
        name: &'static str,
        check: C,
        failed_message: impl Into<FailedMessage>,
    ) -> Self
    where
        C: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        self.pipeline.add_rule(name, check, failed_message);
        self
    }

    /// Value must be present: anything but `null` passes.
    pub fn required(self) -> Self {
        self.rule(
            "required",
            |value| CheckResult::from_bool(!value.is_null()),
            "This field is required.",
        )
    }

    /// Number must be at least `minimum`.
    pub fn min(self, minimum: f64) -> Self {
        self.rule(
            "min",
            move |value| CheckResult::from_bool(value.as_f64().is_some_and(|n| n >= minimum)),
            FailedMessage::computed(move || format!("Number must be at least {minimum}")),
        )
    }

    /// Number must be at most `maximum`.
    pub fn max(self, maximum: f64) -> Self {
        self.rule(
            "max",
            move |value| CheckResult::from_bool(value.as_f64().is_some_and(|n| n <= maximum)),
            FailedMessage::computed(move || format!("Number must be at most {maximum}")),
        )
    }

    /// Number must be an integer.
    pub fn integer(self) -> Self {
        self.rule(
            "integer",
            |value| CheckResult::from_bool(value.as_i64().is_some() || value.as_u64().is_some()),
            "Number must be an integer",
        )
    }

    /// Number must be greater than zero.
    pub fn positive(self) -> Self {
        self.rule(
            "positive",
            |value| CheckResult::from_bool(value.as_f64().is_some_and(|n| n > 0.0)),
            "Number must be positive",
        )
    }
}

impl ValidateValue for NumberValidator {
    fn validate_value(&self, value: &Value) -> ValidationOutcome {
        self.pipeline.validate(value)
    }
}
