//! Output formatting for clockin.
//!
//! Each parsed value has a pretty and a JSON rendering.

mod json;
mod pretty;

use chrono::{Duration, NaiveDateTime};

use crate::cli::args::OutputFormat;
use crate::error::ClockinError;
use crate::parser::{CalendarRange, ResolvedArgs};

pub use json::*;
pub use pretty::*;

/// Format a parsed duration based on output format
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_duration_output(input: &str, duration: Duration, format: OutputFormat) -> Result<String, ClockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_duration_pretty(input, duration)),
        OutputFormat::Json => format_duration_json(input, duration),
    }
}

/// Format a resolved timestamp based on output format
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_timestamp(input: &str, timestamp: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_timestamp_pretty(input, timestamp)),
        OutputFormat::Json => format_timestamp_json(input, timestamp),
    }
}

/// Format a resolved deadline based on output format
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_deadline(
    input: &str,
    deadline: NaiveDateTime,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, ClockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_deadline_pretty(input, deadline, now)),
        OutputFormat::Json => format_deadline_json(input, deadline, now),
    }
}

/// Format a calendar range based on output format
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_range(label: &str, range: &CalendarRange, format: OutputFormat) -> Result<String, ClockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_range_pretty(label, range)),
        OutputFormat::Json => format_range_json(label, range),
    }
}

/// Format resolved arguments based on output format
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_resolved_args(args: &ResolvedArgs, format: OutputFormat) -> Result<String, ClockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_args_pretty(args)),
        OutputFormat::Json => format_args_json(args),
    }
}

/// Format an error based on output format
#[must_use]
pub fn format_error(error: &ClockinError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => format_error_pretty(error),
        OutputFormat::Json => format_error_json(error),
    }
}
