use std::fmt::Write;

use chrono::{Duration, NaiveDateTime};
use colored::Colorize;

use crate::error::ClockinError;
use crate::parser::{format_duration, CalendarRange, ResolvedArgs};

const INSTANT_FORMAT: &str = "%a %Y-%m-%d %H:%M:%S";

fn instant(value: NaiveDateTime) -> String {
    value.format(INSTANT_FORMAT).to_string()
}

/// Format a parsed duration as pretty output
pub fn format_duration_pretty(input: &str, duration: Duration) -> String {
    let mut output = format!("{} {}\n", "Duration".bold(), format_duration(duration).green());
    writeln!(output, "  {}: {input}", "Input".dimmed()).ok();
    writeln!(output, "  {}: {}", "Seconds".dimmed(), duration.num_seconds()).ok();
    output
}

/// Format a resolved timestamp as pretty output
pub fn format_timestamp_pretty(input: &str, timestamp: NaiveDateTime) -> String {
    let mut output = format!("{} {}\n", "Timestamp".bold(), instant(timestamp).green());
    writeln!(output, "  {}: {input}", "Input".dimmed()).ok();
    output
}

/// Format a resolved deadline as pretty output
pub fn format_deadline_pretty(input: &str, deadline: NaiveDateTime, now: NaiveDateTime) -> String {
    let mut output = format!("{} {}\n", "Deadline".bold(), instant(deadline).yellow());
    writeln!(output, "  {}: {input}", "Input".dimmed()).ok();
    writeln!(output, "  {}: {}", "Due in".dimmed(), format_duration(deadline - now)).ok();
    output
}

/// Format a half-open calendar range as pretty output
pub fn format_range_pretty(label: &str, range: &CalendarRange) -> String {
    let mut output = format!("{}\n", label.bold());
    writeln!(output, "  {}: {}", "Start".dimmed(), instant(range.start).green()).ok();
    writeln!(output, "  {}: {} {}", "End".dimmed(), instant(range.end).green(), "(exclusive)".dimmed()).ok();
    writeln!(output, "  {}: {}", "Length".dimmed(), format_duration(range.duration())).ok();
    output
}

/// Format resolved command arguments as pretty output
pub fn format_args_pretty(args: &ResolvedArgs) -> String {
    let mut output = format!("{}\n", "Arguments".bold());

    if let Some(project) = &args.project_sid {
        writeln!(output, "  {}: {}", "Project".dimmed(), project.magenta()).ok();
    }
    if let Some(task) = &args.task_sid {
        writeln!(output, "  {}: {}", "Task".dimmed(), task.cyan()).ok();
    }
    if let Some(note) = &args.note {
        writeln!(output, "  {}: {note}", "Note".dimmed()).ok();
    }

    writeln!(output, "  {}: {}", "Start".dimmed(), instant(args.start).green()).ok();
    if let Some(end) = args.end {
        writeln!(output, "  {}: {}", "End".dimmed(), instant(end).green()).ok();
    }
    if let Some(elapsed) = args.elapsed() {
        writeln!(output, "  {}: {}", "Elapsed".dimmed(), format_duration(elapsed)).ok();
    }

    output
}

/// Format an error for the terminal.
///
/// Parse errors include their examples and suggestion.
pub fn format_error_pretty(error: &ClockinError) -> String {
    let body = error
        .as_parse_error()
        .map_or_else(|| error.to_string(), crate::parser::StructuredParseError::render);
    format!("{}: {body}", "error".red().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseKind, StructuredParseError};
    use chrono::NaiveDate;

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_duration_pretty() {
        let output = format_duration_pretty("1h30m", Duration::minutes(90));
        assert!(output.contains("1h30m"));
        assert!(output.contains("5400"));
    }

    #[test]
    fn test_format_timestamp_pretty() {
        let output = format_timestamp_pretty("9am", at(9, 0));
        assert!(output.contains("Thu 2026-01-15 09:00:00"));
        assert!(output.contains("9am"));
    }

    #[test]
    fn test_format_deadline_pretty_shows_remaining() {
        let output = format_deadline_pretty("+90m", at(19, 30), at(18, 0));
        assert!(output.contains("1h30m"));
    }

    #[test]
    fn test_format_range_pretty() {
        let range = CalendarRange {
            start: at(0, 0),
            end: at(12, 0),
        };
        let output = format_range_pretty("today", &range);
        assert!(output.contains("today"));
        assert!(output.contains("(exclusive)"));
        assert!(output.contains("12h"));
    }

    #[test]
    fn test_format_args_pretty_optional_fields() {
        let args = ResolvedArgs {
            project_sid: Some("api".to_string()),
            task_sid: None,
            note: None,
            start: at(9, 0),
            end: None,
        };
        let output = format_args_pretty(&args);
        assert!(output.contains("api"));
        assert!(!output.contains("Task"));
        assert!(!output.contains("Elapsed"));
    }

    #[test]
    fn test_format_args_pretty_elapsed() {
        let args = ResolvedArgs {
            project_sid: None,
            task_sid: None,
            note: Some("standup".to_string()),
            start: at(9, 0),
            end: Some(at(17, 0)),
        };
        let output = format_args_pretty(&args);
        assert!(output.contains("standup"));
        assert!(output.contains("8h"));
    }

    #[test]
    fn test_format_error_pretty_renders_examples() {
        let err = ClockinError::from(StructuredParseError::new(ParseKind::Duration, "soon", "no unit"));
        let output = format_error_pretty(&err);
        assert!(output.contains("invalid duration 'soon': no unit"));
        assert!(output.contains("Valid examples:"));
    }

    #[test]
    fn test_format_error_pretty_other_errors() {
        let err = ClockinError::Config("bad file".to_string());
        assert!(format_error_pretty(&err).contains("configuration error: bad file"));
    }
}
