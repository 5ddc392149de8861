//! The rule execution engine.
//!
//! A [`Pipeline`] owns an ordered list of rules. Builder methods on the
//! typed validators append to it during the declaration phase; afterwards
//! `validate` walks the list read-only, so one pipeline can serve any
//! number of concurrent requests.

use crate::rule::{CheckResult, FailedMessage, Rule};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Execution options for a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Stop at the first failing rule instead of running the whole list
    /// and accumulating every failure. Defaults to `false`: every rule is
    /// independently safe on any input, so running all of them yields the
    /// complete failure picture in one pass.
    #[serde(default)]
    pub stop_on_first_error: bool,
}

/// A single recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Name of the rule that failed.
    pub rule: String,
    /// Rendered failure message.
    pub message: String,
}

/// Result of running a value through a pipeline.
///
/// `value` is the final working value: rewrites from transform rules such
/// as `trim` apply even when a later rule fails.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    /// Whether no rule failed.
    pub is_valid: bool,
    /// The final, possibly rewritten value.
    pub value: Value,
    /// Every recorded failure, in rule declaration order.
    pub failures: Vec<RuleFailure>,
}

/// An ordered sequence of rules plus execution options.
///
/// Rules execute in insertion order; order matters (`trim` before `min`
/// changes what length is measured). `add_rule` does not enforce name
/// uniqueness: duplicate names are allowed and all execute, which permits
/// layered constraints under one conceptual name.
#[derive(Debug, Default)]
pub struct Pipeline {
    rules: Vec<Rule>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create an empty pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pipeline with the given options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            rules: Vec::new(),
            options,
        }
    }

    /// Current execution options.
    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Replace the execution options.
    pub fn set_options(&mut self, options: PipelineOptions) {
        self.options = options;
    }

    /// Append a rule. Insertion order is evaluation order.
    pub fn add_rule<C>(
        &mut self,
        name: impl Into<std::borrow::Cow<'static, str>>,
        check: C,
        failed_message: impl Into<FailedMessage>,
    ) where
        C: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(name, check, failed_message));
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the registered rules, in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    // Replace the failure message of the most recently appended rule.
    // No-op on an empty pipeline.
    pub(crate) fn override_last_message(&mut self, message: FailedMessage) {
        if let Some(rule) = self.rules.last_mut() {
            rule.set_message(message);
        }
    }

    /// Run a value through every rule in insertion order.
    ///
    /// The working value starts as a clone of the input. Each rule's
    /// check runs against the current working value; a returned
    /// `new_value` replaces it regardless of the verdict. Failures are
    /// recorded in order, and evaluation stops early only when
    /// `stop_on_first_error` is set. This method never panics and never
    /// returns an error: all failure information is in-band.
    pub fn validate(&self, value: &Value) -> ValidationOutcome {
        let mut working = value.clone();
        let mut failures = Vec::new();

        for rule in &self.rules {
            let result = rule.check(&working);

            if let Some(new_value) = result.new_value {
                tracing::trace!(rule = rule.name(), "rule rewrote working value");
                working = new_value;
            }

            if !result.is_ok {
                let message = rule.render_message();
                tracing::debug!(rule = rule.name(), %message, "rule failed");
                failures.push(RuleFailure {
                    rule: rule.name().to_string(),
                    message,
                });

                if self.options.stop_on_first_error {
                    break;
                }
            }
        }

        ValidationOutcome {
            is_valid: failures.is_empty(),
            value: working,
            failures,
        }
    }
}
