//! Duration parsing.
//!
//! Accepts compact durations (`1h30m`, `45s`, `2.5h`, `-2h`) and a looser
//! spoken form (`90 minutes`, `1 hour 30 minutes`, `2`). Bare numbers are hours.

use std::fmt::Write;

use chrono::Duration;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::errors::{duration_error, StructuredParseError};

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

/// Units of the compact grammar, longest first so `ms` wins over `m`.
const COMPACT_UNITS: &[(&str, i128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("ms", 1_000_000),
    ("h", NANOS_PER_HOUR),
    ("m", NANOS_PER_MINUTE),
    ("s", NANOS_PER_SECOND),
];

/// Unit words of the loose grammar.
const HOUR_WORDS: &[&str] = &["hour", "hours", "hr", "hrs", "h"];
const MINUTE_WORDS: &[&str] = &["minute", "minutes", "min", "mins", "m"];
const SECOND_WORDS: &[&str] = &["second", "seconds", "sec", "secs", "s"];

static LOOSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*([a-z]+)?(?:\s*(\d+(?:\.\d+)?)\s*([a-z]+))?$")
        .unwrap_or_else(|e| panic!("Invalid loose duration regex: {e}"))
});

/// Result of [`parse_duration`].
///
/// An invalid result always carries a zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationResult {
    /// The parsed duration, zero when invalid.
    pub duration: Duration,
    /// Whether the input matched either grammar.
    pub valid: bool,
}

impl DurationResult {
    /// A successful parse.
    #[must_use]
    pub const fn valid(duration: Duration) -> Self {
        Self {
            duration,
            valid: true,
        }
    }

    /// A failed parse.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            duration: Duration::zero(),
            valid: false,
        }
    }

    /// The duration, if valid.
    #[must_use]
    pub const fn ok(&self) -> Option<Duration> {
        if self.valid {
            Some(self.duration)
        } else {
            None
        }
    }
}

/// Parse a duration phrase.
///
/// Tries the compact grammar first and falls back to the loose grammar.
/// Never fails: unparseable input yields [`DurationResult::invalid`].
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use clockin::parser::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").duration, Duration::minutes(90));
/// assert_eq!(parse_duration("2.5 hours").duration, Duration::minutes(150));
/// assert!(!parse_duration("soon").valid);
/// ```
#[must_use]
pub fn parse_duration(input: &str) -> DurationResult {
    let input = input.trim();
    if input.is_empty() {
        return DurationResult::invalid();
    }

    if let Some(nanos) = parse_compact(input) {
        trace!("duration '{input}' matched compact grammar");
        return to_result(nanos);
    }

    if let Some(nanos) = parse_loose(input) {
        trace!("duration '{input}' matched loose grammar");
        return to_result(nanos);
    }

    trace!("duration '{input}' matched no grammar");
    DurationResult::invalid()
}

/// Parse a duration phrase, failing with a structured error.
///
/// # Errors
///
/// Returns a duration [`StructuredParseError`] if the input matches neither grammar.
pub fn parse_duration_strict(input: &str) -> Result<Duration, StructuredParseError> {
    parse_duration(input).ok().ok_or_else(|| duration_error(input))
}

/// Cheap check for whether an input is worth handing to [`parse_duration`].
///
/// True if the input starts with a digit and either mentions a unit or is a
/// plain number.
#[must_use]
pub fn is_duration_like(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    if !lower.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }

    let mentions_unit = HOUR_WORDS
        .iter()
        .chain(MINUTE_WORDS)
        .chain(SECOND_WORDS)
        .any(|unit| lower.contains(*unit));

    mentions_unit || lower.parse::<f64>().is_ok()
}

/// Render a duration in the compact grammar, e.g. `1h30m`, `45s`, `-2h`.
///
/// Sub-second precision is dropped.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    if total == 0 {
        return "0s".to_string();
    }

    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = sign.to_string();
    if hours > 0 {
        write!(out, "{hours}h").ok();
    }
    if minutes > 0 {
        write!(out, "{minutes}m").ok();
    }
    if seconds > 0 {
        write!(out, "{seconds}s").ok();
    }
    out
}

fn to_result(nanos: i128) -> DurationResult {
    i64::try_from(nanos)
        .map(|n| DurationResult::valid(Duration::nanoseconds(n)))
        .unwrap_or_else(|_| DurationResult::invalid())
}

/// Compact grammar: `[+-]` then one or more `<number><unit>` with no separators.
fn parse_compact(input: &str) -> Option<i128> {
    let (negative, mut rest) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let (unit, per_unit) = COMPACT_UNITS
            .iter()
            .find(|(unit, _)| tail.starts_with(*unit))?;

        total = total.checked_add(scale_decimal(number, *per_unit)?)?;
        rest = &tail[unit.len()..];
    }

    Some(if negative { -total } else { total })
}

/// Loose grammar: `<number>[ ]<unit>[ <number>[ ]<unit>]`, first unit defaults to hours.
fn parse_loose(input: &str) -> Option<i128> {
    let caps = LOOSE_PATTERN.captures(input)?;

    let first_unit = match caps.get(2) {
        Some(word) => unit_nanos(word.as_str())?,
        None => NANOS_PER_HOUR,
    };
    let mut total = scale_decimal(caps.get(1)?.as_str(), first_unit)?;

    if let (Some(number), Some(word)) = (caps.get(3), caps.get(4)) {
        total = total.checked_add(scale_decimal(number.as_str(), unit_nanos(word.as_str())?)?)?;
    }

    Some(total)
}

fn unit_nanos(word: &str) -> Option<i128> {
    let word = word.to_lowercase();
    let word = word.as_str();

    if HOUR_WORDS.contains(&word) {
        Some(NANOS_PER_HOUR)
    } else if MINUTE_WORDS.contains(&word) {
        Some(NANOS_PER_MINUTE)
    } else if SECOND_WORDS.contains(&word) {
        Some(NANOS_PER_SECOND)
    } else {
        None
    }
}

/// Multiply a decimal string by a unit without going through floating point.
///
/// Accepts `12`, `12.5`, `12.` and `.5`; rejects an empty or lone `.` and
/// fractions finer than a nanosecond.
fn scale_decimal(number: &str, per_unit: i128) -> Option<i128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole_value: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut total = whole_value.checked_mul(per_unit)?;

    // Non-zero digits beyond nanosecond precision cannot be represented.
    let mut scale = per_unit;
    for (i, digit) in frac.bytes().enumerate() {
        scale /= 10;
        if scale == 0 {
            if frac.bytes().skip(i).any(|b| b != b'0') {
                return None;
            }
            break;
        }
        total = total.checked_add(i128::from(digit - b'0') * scale)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===================
    // Compact Grammar Tests
    // ===================

    #[test]
    fn test_compact_hours_minutes() {
        assert_eq!(parse_duration("1h30m"), DurationResult::valid(Duration::minutes(90)));
    }

    #[test]
    fn test_compact_fractional_hours_are_lossless() {
        assert_eq!(parse_duration("2.5h").duration, Duration::minutes(150));
        assert_eq!(parse_duration("0.1h").duration, Duration::minutes(6));
        assert_eq!(parse_duration(".5m").duration, Duration::seconds(30));
    }

    #[test]
    fn test_sub_nanosecond_fraction_is_invalid() {
        let result = parse_duration("0.0000000001s");
        assert!(!result.valid);
        assert_eq!(result.duration, Duration::zero());

        assert_eq!(parse_duration("1.0000000000s").duration, Duration::seconds(1));
        assert_eq!(parse_duration("0.000000001s").duration, Duration::nanoseconds(1));
    }

    #[test]
    fn test_compact_seconds_and_millis() {
        assert_eq!(parse_duration("45s").duration, Duration::seconds(45));
        assert_eq!(parse_duration("1m500ms").duration, Duration::milliseconds(60_500));
    }

    #[test]
    fn test_compact_zero_is_valid() {
        let result = parse_duration("0h");
        assert!(result.valid);
        assert_eq!(result.duration, Duration::zero());
    }

    #[test]
    fn test_compact_negative_passes_through() {
        assert_eq!(parse_duration("-2h").duration, Duration::hours(-2));
        assert_eq!(parse_duration("+2h").duration, Duration::hours(2));
    }

    #[test]
    fn test_compact_rejects_trailing_garbage() {
        assert!(!parse_duration("1h30x").valid);
        assert!(!parse_duration("1h30").valid);
    }

    // ===================
    // Loose Grammar Tests
    // ===================

    #[test]
    fn test_loose_unit_words() {
        assert_eq!(parse_duration("2.5 hours").duration, Duration::minutes(150));
        assert_eq!(parse_duration("90 minutes").duration, Duration::minutes(90));
        assert_eq!(parse_duration("30 secs").duration, Duration::seconds(30));
        assert_eq!(parse_duration("90min").duration, Duration::minutes(90));
    }

    #[test]
    fn test_loose_two_parts() {
        assert_eq!(parse_duration("1 hour 30 minutes").duration, Duration::minutes(90));
        assert_eq!(parse_duration("2hrs 15mins").duration, Duration::minutes(135));
    }

    #[test]
    fn test_loose_case_insensitive() {
        assert_eq!(parse_duration("2 HOURS").duration, Duration::hours(2));
        assert_eq!(parse_duration("1H30M").duration, Duration::minutes(90));
    }

    #[test]
    fn test_bare_number_defaults_to_hours() {
        assert_eq!(parse_duration("2").duration, Duration::hours(2));
        assert_eq!(parse_duration("1.5").duration, Duration::minutes(90));
    }

    #[test]
    fn test_first_unit_defaults_to_hours() {
        assert_eq!(parse_duration("1 30 minutes").duration, Duration::minutes(90));
    }

    #[test]
    fn test_loose_rejects_unknown_unit() {
        assert!(!parse_duration("2 parsecs").valid);
        assert!(!parse_duration("1 hour 30 fortnights").valid);
    }

    // ===================
    // Invalid Input Tests
    // ===================

    #[test]
    fn test_invalid_inputs_are_zero() {
        for input in ["", "   ", "soon", "h", "-", ".", "1h 30 minutes extra", "abc1h"] {
            let result = parse_duration(input);
            assert!(!result.valid, "{input:?} should be invalid");
            assert_eq!(result.duration, Duration::zero());
        }
    }

    #[test]
    fn test_huge_input_does_not_panic() {
        let huge = "9".repeat(10_000) + "h";
        assert!(!parse_duration(&huge).valid);
        assert!(!parse_duration("9999999999h").valid);
        assert_eq!(parse_duration(&"1h".repeat(100_000)).duration, Duration::hours(100_000));
    }

    #[test]
    fn test_strict_returns_structured_error() {
        let err = parse_duration_strict("forever").unwrap_err();
        assert_eq!(err.input, "forever");
        assert!(!err.examples.is_empty());
        assert_eq!(parse_duration_strict("45m").unwrap(), Duration::minutes(45));
    }

    // ===================
    // Helper Tests
    // ===================

    #[test]
    fn test_is_duration_like() {
        assert!(is_duration_like("2h"));
        assert!(is_duration_like("90 minutes"));
        assert!(is_duration_like("2.5"));
        assert!(!is_duration_like("h2"));
        assert!(!is_duration_like("2026-01-15"));
        assert!(!is_duration_like(""));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(90)), "1h30m");
        assert_eq!(format_duration(Duration::seconds(45)), "45s");
        assert_eq!(format_duration(Duration::hours(-2)), "-2h");
        assert_eq!(format_duration(Duration::zero()), "0s");
        assert_eq!(format_duration(Duration::seconds(3661)), "1h1m1s");
    }

    #[test]
    fn test_format_duration_reparses() {
        let original = Duration::seconds(5_025);
        assert_eq!(parse_duration(&format_duration(original)).duration, original);
    }
}
