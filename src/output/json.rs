//! JSON output formatting for clockin.
//!
//! Instants are rendered as ISO 8601 local date-times without an offset.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use serde_json::json;

use crate::error::ClockinError;
use crate::parser::{format_duration, CalendarRange, ResolvedArgs};

/// Format a parsed duration as JSON
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_duration_json(input: &str, duration: Duration) -> Result<String, ClockinError> {
    let output = json!({
        "input": input,
        "duration": format_duration(duration),
        "seconds": duration.num_seconds(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a resolved timestamp as JSON
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_timestamp_json(input: &str, timestamp: NaiveDateTime) -> Result<String, ClockinError> {
    let output = json!({
        "input": input,
        "timestamp": timestamp,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a resolved deadline as JSON
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_deadline_json(input: &str, deadline: NaiveDateTime, now: NaiveDateTime) -> Result<String, ClockinError> {
    let output = json!({
        "input": input,
        "deadline": deadline,
        "due_in_seconds": (deadline - now).num_seconds(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a calendar range as JSON
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_range_json(label: &str, range: &CalendarRange) -> Result<String, ClockinError> {
    let output = json!({
        "label": label,
        "start": range.start,
        "end": range.end,
        "seconds": range.duration().num_seconds(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format resolved arguments as JSON
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn format_args_json(args: &ResolvedArgs) -> Result<String, ClockinError> {
    let output = json!({
        "project": args.project_sid,
        "task": args.task_sid,
        "note": args.note,
        "start": args.start,
        "end": args.end,
        "elapsed_seconds": args.elapsed().map(|d| d.num_seconds()),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an error as a `{"error": {...}}` envelope.
///
/// Parse errors carry their full structure; other errors only a message.
#[must_use]
pub fn format_error_json(error: &ClockinError) -> String {
    let envelope = error
        .as_parse_error()
        .map_or_else(|| json!({ "error": { "message": error.to_string() } }), |e| e.to_json());
    serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| error.to_string())
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `ClockinError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ClockinError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseKind, StructuredParseError};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_format_duration_json() {
        let value = parse(&format_duration_json("2.5h", Duration::minutes(150)).unwrap());
        assert_eq!(value["duration"], "2h30m");
        assert_eq!(value["seconds"], 9000);
        assert_eq!(value["input"], "2.5h");
    }

    #[test]
    fn test_format_timestamp_json() {
        let value = parse(&format_timestamp_json("9am", at(9, 0)).unwrap());
        assert_eq!(value["timestamp"], "2026-01-15T09:00:00");
    }

    #[test]
    fn test_format_deadline_json() {
        let value = parse(&format_deadline_json("+90m", at(19, 30), at(18, 0)).unwrap());
        assert_eq!(value["deadline"], "2026-01-15T19:30:00");
        assert_eq!(value["due_in_seconds"], 5400);
    }

    #[test]
    fn test_format_range_json() {
        let range = CalendarRange {
            start: at(0, 0),
            end: at(6, 0),
        };
        let value = parse(&format_range_json("today", &range).unwrap());
        assert_eq!(value["start"], "2026-01-15T00:00:00");
        assert_eq!(value["end"], "2026-01-15T06:00:00");
        assert_eq!(value["seconds"], 21600);
    }

    #[test]
    fn test_format_args_json_nulls() {
        let args = ResolvedArgs {
            project_sid: Some("api".to_string()),
            task_sid: None,
            note: None,
            start: at(9, 0),
            end: None,
        };
        let value = parse(&format_args_json(&args).unwrap());
        assert_eq!(value["project"], "api");
        assert!(value["task"].is_null());
        assert!(value["elapsed_seconds"].is_null());
    }

    #[test]
    fn test_format_error_json_parse_error() {
        let err = ClockinError::from(StructuredParseError::new(ParseKind::Deadline, "+5y", "invalid time unit 'y'"));
        let value = parse(&format_error_json(&err));
        assert_eq!(value["error"]["kind"], "deadline");
        assert_eq!(value["error"]["input"], "+5y");
        assert!(value["error"]["examples"].is_array());
    }

    #[test]
    fn test_format_error_json_other_error() {
        let err = ClockinError::Config("bad".to_string());
        let value = parse(&format_error_json(&err));
        assert_eq!(value["error"]["message"], "configuration error: bad");
    }

    #[test]
    fn test_to_json_generic() {
        let json = to_json(&vec!["a", "b"]).unwrap();
        assert!(json.contains("\"a\""));
    }
}
