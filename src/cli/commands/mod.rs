//! Command implementations for clockin.
//!
//! Every command takes the reference instant from the caller so a single
//! invocation never samples the clock twice.

use chrono::NaiveDateTime;
use log::debug;
use serde_json::json;

use crate::cli::args::{ArgsArgs, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::ClockinError;
use crate::output::{format_deadline, format_duration_output, format_range, format_resolved_args, format_timestamp, to_json};
use crate::parser::{
    extract_args, get_period_range_at, parse_date_range_at, parse_deadline_args_at, parse_duration_strict,
    parse_timestamp_at, split_range_phrase, FlagOverrides, NamedPeriod, NaturalLanguage,
};

fn join(input: &[String]) -> String {
    input.join(" ")
}

/// Execute the args command: extract, apply flag overrides, resolve.
///
/// # Errors
///
/// Returns a parse error if a start or end time cannot be resolved.
pub fn args(args: &ArgsArgs, now: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    let mut parsed = extract_args(&args.tokens);
    debug!("extracted {parsed:?}");

    parsed.merge(&FlagOverrides::from(args));
    let resolved = parsed.resolve_at(now, &NaturalLanguage)?;
    format_resolved_args(&resolved, format)
}

/// Execute the duration command
///
/// # Errors
///
/// Returns a parse error if the input is not a duration.
pub fn duration(input: &[String], format: OutputFormat) -> Result<String, ClockinError> {
    let input = join(input);
    let duration = parse_duration_strict(&input)?;
    format_duration_output(&input, duration, format)
}

/// Execute the timestamp command
///
/// # Errors
///
/// Returns a parse error if the input cannot be resolved.
pub fn timestamp(input: &[String], now: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    let input = join(input);
    let timestamp = parse_timestamp_at(&input, now, &NaturalLanguage)?;
    format_timestamp(&input, timestamp, format)
}

/// Execute the deadline command
///
/// # Errors
///
/// Returns a parse error if the input is missing, malformed, or in the past.
pub fn deadline(input: &[String], now: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    let deadline = parse_deadline_args_at(input, now, &NaturalLanguage)?;
    format_deadline(&join(input), deadline, now, format)
}

/// Execute the period command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn period(name: &[String], now: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    let name = join(name);
    let range = get_period_range_at(&name, now);
    let label = NamedPeriod::from_name(&name).to_string();
    format_range(&label, &range, format)
}

/// Execute the range command
///
/// # Errors
///
/// Returns a parse error if either side cannot be resolved or the range is empty.
pub fn range(input: &[String], now: NaiveDateTime, format: OutputFormat) -> Result<String, ClockinError> {
    let input = join(input);
    let (from, to) = split_range_phrase(&input);
    let range = parse_date_range_at(from, to, now, &NaturalLanguage)?;
    format_range(&input, &range, format)
}

/// Execute the config command
///
/// # Errors
///
/// Returns an error if the config file cannot be written or serialized.
pub fn config(paths: &Paths, config: &Config, init: bool, format: OutputFormat) -> Result<String, ClockinError> {
    let path = paths.config_file.display().to_string();

    if init {
        if paths.config_file.exists() {
            return Ok(format!("Config already exists: {path}"));
        }
        Config::default().save(paths)?;
        return Ok(format!("Created config: {path}"));
    }

    match format {
        OutputFormat::Json => to_json(&json!({ "path": path, "config": config })),
        OutputFormat::Pretty => Ok(format!("# {path}\n{}", serde_yaml::to_string(config)?)),
    }
}
