//! The string validator family.
//!
//! Every method appends one rule to the underlying [`Pipeline`] and
//! returns the builder for chaining. Apart from `required`, every rule
//! treats a non-string input as a plain failure, never a panic, so the
//! engine needs no type guards of its own and rules stay independently
//! safe to run after a prior failure.

use crate::pipeline::{Pipeline, PipelineOptions, ValidationOutcome};
use crate::rule::{CheckResult, FailedMessage};
use crate::schema::ValidateValue;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

// Pre-compiled regex patterns shared by every validator instance.
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static DATETIME_REGEX: OnceLock<Regex> = OnceLock::new();
static IPV4_REGEX: OnceLock<Regex> = OnceLock::new();
static IPV6_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
static BASE64_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    // local@domain.tld: no whitespace, no @ in local or domain, at least
    // one dot in the domain.
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn datetime_regex() -> &'static Regex {
    // ISO 8601 extended: date, T, time, optional fractional seconds,
    // optional Z or +-HH:MM / +-HHMM offset.
    DATETIME_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[-+]\d{2}:?\d{2})?$")
            .unwrap()
    })
}

fn ipv4_regex() -> &'static Regex {
    IPV4_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
        )
        .unwrap()
    })
}

fn ipv6_regex() -> &'static Regex {
    // Full compressed-form IPv6 grammar.
    IPV6_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:(?:[a-fA-F0-9]{1,4}:){7}[a-fA-F0-9]{1,4}|(?:[a-fA-F0-9]{1,4}:){1,7}:|(?:[a-fA-F0-9]{1,4}:){1,6}:[a-fA-F0-9]{1,4}|(?:[a-fA-F0-9]{1,4}:){1,5}(?::[a-fA-F0-9]{1,4}){1,2}|(?:[a-fA-F0-9]{1,4}:){1,4}(?::[a-fA-F0-9]{1,4}){1,3}|(?:[a-fA-F0-9]{1,4}:){1,3}(?::[a-fA-F0-9]{1,4}){1,4}|(?:[a-fA-F0-9]{1,4}:){1,2}(?::[a-fA-F0-9]{1,4}){1,5}|[a-fA-F0-9]{1,4}:(?:(?::[a-fA-F0-9]{1,4}){1,6})|:(?:(?::[a-fA-F0-9]{1,4}){1,7}|:))$",
        )
        .unwrap()
    })
}

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

fn time_regex() -> &'static Regex {
    TIME_REGEX.get_or_init(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d(?:\.\d+)?$").unwrap())
}

fn base64_regex() -> &'static Regex {
    BASE64_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap())
}

/// Fluent builder for string field validation.
///
/// ```rust,ignore
/// use lattice_validate::prelude::*;
/// use serde_json::json;
///
/// let username = StringValidator::new()
///     .required()
///     .trim()
///     .min(3)
///     .max(32);
///
/// let outcome = username.validate(&json!("  ada  "));
/// assert!(outcome.is_valid);
/// assert_eq!(outcome.value, json!("ada"));
/// ```
#[derive(Debug, Default)]
pub struct StringValidator {
    pipeline: Pipeline,
}

impl StringValidator {
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
    ///
    /// ```rust,ignore
    /// StringValidator::new().min(3).message("Pick a longer name")
    /// ```
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

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
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

    /// Value must be present: anything but `null` passes, including `""`
    /// and `0`.
    pub fn required(self) -> Self {
        self.rule(
            "required",
            |value| CheckResult::from_bool(!value.is_null()),
            "This field is required.",
        )
    }

    /// Replace the working value with its trimmed form.
    pub fn trim(self) -> Self {
        self.rule(
            "trim",
            |value| match value.as_str() {
                Some(s) => CheckResult::rewrite(true, Value::String(s.trim().to_string())),
                None => CheckResult::fail(),
            },
            "This field is not a string.",
        )
    }

    /// String length must be at most `max_length` characters.
    pub fn max(self, max_length: usize) -> Self {
        self.rule(
            "max",
            move |value| {
                CheckResult::from_bool(
                    value
                        .as_str()
                        .is_some_and(|s| s.chars().count() <= max_length),
                )
            },
            FailedMessage::computed(move || {
                format!("String must be at most {max_length} characters long")
            }),
        )
    }

    /// String length must be at least `min_length` characters.
    pub fn min(self, min_length: usize) -> Self {
        self.rule(
            "min",
            move |value| {
                CheckResult::from_bool(
                    value
                        .as_str()
                        .is_some_and(|s| s.chars().count() >= min_length),
                )
            },
            FailedMessage::computed(move || {
                format!("String must be at least {min_length} characters long")
            }),
        )
    }

    /// String length must be exactly `exact_length` characters.
    pub fn length(self, exact_length: usize) -> Self {
        self.rule(
            "length",
            move |value| {
                CheckResult::from_bool(
                    value
                        .as_str()
                        .is_some_and(|s| s.chars().count() == exact_length),
                )
            },
            format!("String must be exactly {exact_length} characters long"),
        )
    }

    /// Value must look like `local@domain.tld`.
    pub fn email(self) -> Self {
        self.rule(
            "email",
            |value| CheckResult::from_bool(value.as_str().is_some_and(|s| email_regex().is_match(s))),
            "Invalid email address",
        )
    }

    /// Value must parse as a well-formed URL.
    pub fn url(self) -> Self {
        self.rule(
            "url",
            |value| {
                CheckResult::from_bool(
                    value.as_str().is_some_and(|s| url::Url::parse(s).is_ok()),
                )
            },
            "Invalid URL",
        )
    }

    /// Value must match the given pattern.
    pub fn regex(self, pattern: Regex) -> Self {
        self.rule(
            "regex",
            move |value| CheckResult::from_bool(value.as_str().is_some_and(|s| pattern.is_match(s))),
            "String does not match pattern",
        )
    }

    /// Value must contain `search` as a substring.
    pub fn includes(self, search: impl Into<String>) -> Self {
        let search = search.into();
        let message = format!("String must include \"{search}\"");
        self.rule(
            "includes",
            move |value| CheckResult::from_bool(value.as_str().is_some_and(|s| s.contains(&search))),
            message,
        )
    }

    /// Value must start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let message = format!("String must start with \"{prefix}\"");
        self.rule(
            "starts_with",
            move |value| {
                CheckResult::from_bool(value.as_str().is_some_and(|s| s.starts_with(&prefix)))
            },
            message,
        )
    }

    /// Value must end with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let message = format!("String must end with \"{suffix}\"");
        self.rule(
            "ends_with",
            move |value| CheckResult::from_bool(value.as_str().is_some_and(|s| s.ends_with(&suffix))),
            message,
        )
    }

    /// Value must be an ISO 8601 extended datetime, e.g.
    /// `2024-01-31T12:30:00Z` or `2024-01-31T12:30:00.250+02:00`.
    pub fn datetime(self) -> Self {
        self.rule(
            "datetime",
            |value| {
                CheckResult::from_bool(value.as_str().is_some_and(|s| datetime_regex().is_match(s)))
            },
            "Invalid ISO 8601 datetime",
        )
    }

    /// Value must be an IPv4 dotted-quad or IPv6 address.
    pub fn ip(self) -> Self {
        self.rule(
            "ip",
            |value| {
                CheckResult::from_bool(
                    value
                        .as_str()
                        .is_some_and(|s| ipv4_regex().is_match(s) || ipv6_regex().is_match(s)),
                )
            },
            "Invalid IP address",
        )
    }

    /// Replace the working value with its lowercased form.
    pub fn to_lowercase(self) -> Self {
        self.rule(
            "to_lowercase",
            |value| match value.as_str() {
                Some(s) => CheckResult::rewrite(true, Value::String(s.to_lowercase())),
                None => CheckResult::fail(),
            },
            "Value must be a string",
        )
    }

    /// Replace the working value with its uppercased form.
    pub fn to_uppercase(self) -> Self {
        self.rule(
            "to_uppercase",
            |value| match value.as_str() {
                Some(s) => CheckResult::rewrite(true, Value::String(s.to_uppercase())),
                None => CheckResult::fail(),
            },
            "Value must be a string",
        )
    }

    /// Value must be a `YYYY-MM-DD` date.
    pub fn date(self) -> Self {
        self.rule(
            "date",
            |value| CheckResult::from_bool(value.as_str().is_some_and(|s| date_regex().is_match(s))),
            "Invalid ISO date format (YYYY-MM-DD)",
        )
    }

    /// Value must be a `HH:MM:SS[.fraction]` time, hours 00-23,
    /// minutes and seconds 00-59.
    pub fn time(self) -> Self {
        self.rule(
            "time",
            |value| CheckResult::from_bool(value.as_str().is_some_and(|s| time_regex().is_match(s))),
            "Invalid ISO time format (HH:mm:ss[.SSSSSS])",
        )
    }

    /// Value must use the base64 alphabet with at most two trailing `=`
    /// padding characters.
    pub fn base64(self) -> Self {
        self.rule(
            "base64",
            |value| {
                CheckResult::from_bool(value.as_str().is_some_and(|s| base64_regex().is_match(s)))
            },
            "Invalid base64 string",
        )
    }
}

impl ValidateValue for StringValidator {
    fn validate_value(&self, value: &Value) -> ValidationOutcome {
        self.pipeline.validate(value)
    }
}
