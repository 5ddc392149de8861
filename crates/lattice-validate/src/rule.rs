//! The rule data model: a named check with a lazily rendered failure message.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Failure message attached to a rule.
///
/// Either a fixed string or a zero-argument closure invoked only when the
/// rule actually fails, so expensive formatting never runs on the success
/// path. Closures typically capture the constraint's own arguments:
///
/// ```rust,ignore
/// FailedMessage::computed(move || format!("String must be at most {max_length} characters long"))
/// ```
pub enum FailedMessage {
    /// A fixed message, used verbatim.
    Fixed(String),
    /// A message produced on demand, evaluated only on failure.
    Computed(Box<dyn Fn() -> String + Send + Sync>),
}

impl FailedMessage {
    /// Create a computed message from a closure.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Computed(Box::new(f))
    }

    /// Render the message. Computed variants are invoked here, on the
    /// failure path only.
    pub fn render(&self) -> String {
        match self {
            Self::Fixed(message) => message.clone(),
            Self::Computed(f) => f(),
        }
    }
}

impl From<&str> for FailedMessage {
    fn from(message: &str) -> Self {
        Self::Fixed(message.to_string())
    }
}

impl From<String> for FailedMessage {
    fn from(message: String) -> Self {
        Self::Fixed(message)
    }
}

impl fmt::Debug for FailedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(message) => f.debug_tuple("Fixed").field(message).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Outcome of a single rule check.
///
/// A present `new_value` rewrites the pipeline's working value whether or
/// not the check passed: transform rules report `is_ok` based on the
/// type-correctness of the transform, not on pipeline continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Whether the check passed.
    pub is_ok: bool,
    /// Replacement for the pipeline's working value, if any.
    pub new_value: Option<Value>,
}

impl CheckResult {
    /// A passing check with no rewrite.
    pub fn ok() -> Self {
        Self {
            is_ok: true,
            new_value: None,
        }
    }

    /// A failing check with no rewrite.
    pub fn fail() -> Self {
        Self {
            is_ok: false,
            new_value: None,
        }
    }

    /// A check whose verdict is the given boolean, with no rewrite.
    pub fn from_bool(is_ok: bool) -> Self {
        Self {
            is_ok,
            new_value: None,
        }
    }

    /// A check that rewrites the working value.
    pub fn rewrite(is_ok: bool, new_value: Value) -> Self {
        Self {
            is_ok,
            new_value: Some(new_value),
        }
    }
}

/// Type alias for boxed check functions to reduce signature noise.
pub type CheckFn = Box<dyn Fn(&Value) -> CheckResult + Send + Sync>;

/// A single named check in a validation pipeline.
///
/// Immutable once constructed; only the owning pipeline's ordered list
/// grows, by appension. Checks must be total: a type-mismatched input
/// (e.g. a number handed to a string rule) returns a failing
/// [`CheckResult`], never a panic.
pub struct Rule {
    name: Cow<'static, str>,
    check: CheckFn,
    failed_message: FailedMessage,
}

impl Rule {
    /// Create a new rule.
    pub fn new<C>(
        name: impl Into<Cow<'static, str>>,
        check: C,
        failed_message: impl Into<FailedMessage>,
    ) -> Self
    where
        C: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
            failed_message: failed_message.into(),
        }
    }

    /// The rule name, used in failure records. Names are not unique:
    /// registering the same name twice is allowed and both rules execute.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check against a value.
    pub fn check(&self, value: &Value) -> CheckResult {
        (self.check)(value)
    }

    /// Render the failure message.
    pub fn render_message(&self) -> String {
        self.failed_message.render()
    }

    // Declaration-time message override; used by the builders before the
    // chain is handed out for validation.
    pub(crate) fn set_message(&mut self, message: FailedMessage) {
        self.failed_message = message;
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("failed_message", &self.failed_message)
            .finish_non_exhaustive()
    }
}
