//! Structured parse errors.
//!
//! Every parser in this crate fails with the same shape: the offending input,
//! the kind of value that was expected, a message, a fixed list of valid
//! examples for that kind, and an optional suggestion.

use std::fmt::Write;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Canonical examples shown with every duration error.
pub const DURATION_EXAMPLES: &[&str] = &["30m", "1h30m", "2.5h", "90 minutes", "1 hour 30 minutes"];

/// Canonical examples shown with every timestamp error.
pub const TIMESTAMP_EXAMPLES: &[&str] = &[
    "now",
    "9am",
    "yesterday 3pm",
    "2 hours ago",
    "this week",
    "2026-01-15 14:30",
];

/// Canonical examples shown with every deadline error.
pub const DEADLINE_EXAMPLES: &[&str] = &["+30m", "+2d", "5pm", "tomorrow 9am", "next friday", "2026-12-31"];

/// Canonical examples shown with every date range error.
pub const DATE_RANGE_EXAMPLES: &[&str] = &[
    "today",
    "this week",
    "last month",
    "yesterday to today",
    "2026-01-01 to 2026-01-31",
];

/// Canonical examples shown with command argument errors.
pub const ARGUMENT_EXAMPLES: &[&str] = &[
    "on myproject 9am",
    "on myproject/mytask 9am to 5pm",
    "on myproject 2 hours ago with note \"standup\"",
];

/// The kind of value a failed parse was trying to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseKind {
    /// A duration such as `1h30m`.
    Duration,
    /// A point in time such as `9am`.
    Timestamp,
    /// A future point in time such as `+2d`.
    Deadline,
    /// A pair of instants such as `this week`.
    DateRange,
    /// Positional command arguments.
    Arguments,
}

impl ParseKind {
    /// Field name used in messages and JSON envelopes.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::Deadline => "deadline",
            Self::DateRange => "date range",
            Self::Arguments => "arguments",
        }
    }

    /// The fixed example set for this kind.
    #[must_use]
    pub const fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::Duration => DURATION_EXAMPLES,
            Self::Timestamp => TIMESTAMP_EXAMPLES,
            Self::Deadline => DEADLINE_EXAMPLES,
            Self::DateRange => DATE_RANGE_EXAMPLES,
            Self::Arguments => ARGUMENT_EXAMPLES,
        }
    }
}

impl std::fmt::Display for ParseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parse failure with enough context to teach the user the right format.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid {kind} '{input}': {message}")]
pub struct StructuredParseError {
    /// The offending input, verbatim.
    pub input: String,
    /// What kind of value was expected.
    pub kind: ParseKind,
    /// Human readable cause.
    pub message: String,
    /// Valid inputs of the same kind.
    pub examples: Vec<String>,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl StructuredParseError {
    /// Create an error carrying the canonical examples for `kind`.
    #[must_use]
    pub fn new(kind: ParseKind, input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            kind,
            message: message.into(),
            examples: kind.examples().iter().map(|e| (*e).to_string()).collect(),
            suggestion: None,
        }
    }

    /// Attach a remediation hint.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Replace the example list.
    #[must_use]
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Render the error, the example list, and the suggestion, in that order.
    ///
    /// Empty sections are omitted.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.to_string();

        if !self.examples.is_empty() {
            out.push_str("\n\nValid examples:");
            for example in &self.examples {
                write!(out, "\n  - {example}").ok();
            }
        }

        if let Some(suggestion) = &self.suggestion {
            write!(out, "\n\nSuggestion: {suggestion}").ok();
        }

        out
    }

    /// The `{"error": {...}}` envelope used by JSON output.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({ "error": self })
    }
}

/// Malformed duration.
pub(crate) fn duration_error(input: &str) -> StructuredParseError {
    StructuredParseError::new(
        ParseKind::Duration,
        input,
        "expected a number followed by a unit (h, m, s)",
    )
    .with_suggestion("combine units without spaces, e.g. 1h30m")
}

/// The natural language resolver could not make sense of the input.
pub(crate) fn timestamp_error(input: &str, cause: &str) -> StructuredParseError {
    StructuredParseError::new(ParseKind::Timestamp, input, cause)
}

/// A deadline that resolved to the past and cannot be rolled forward.
pub(crate) fn deadline_past_error(input: &str) -> StructuredParseError {
    StructuredParseError::new(ParseKind::Deadline, input, "deadline must be in the future")
        .with_suggestion("use a relative deadline such as +2d")
}

/// The natural language resolver could not make sense of a deadline.
pub(crate) fn deadline_unresolved_error(input: &str, cause: &str) -> StructuredParseError {
    StructuredParseError::new(ParseKind::Deadline, input, cause)
}

/// Relative shorthand with a bad unit or value.
pub(crate) fn deadline_shorthand_error(input: &str, message: &str) -> StructuredParseError {
    StructuredParseError::new(ParseKind::Deadline, input, message)
        .with_suggestion("use +<number><unit> where unit is one of s, m, h, d, w")
}

/// No deadline tokens were supplied.
pub(crate) fn deadline_required_error() -> StructuredParseError {
    StructuredParseError::new(ParseKind::Deadline, "", "deadline is required")
}
