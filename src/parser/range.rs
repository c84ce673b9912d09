//! Date range parsing for report filters.

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::errors::{ParseKind, StructuredParseError};
use crate::parser::natural::{NaturalDateResolver, NaturalLanguage};
use crate::parser::period::{period_range, CalendarRange, PeriodUnit};
use crate::parser::timestamp::{parse_timestamp_at, PeriodPhrase};

static RANGE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+to\s+").unwrap_or_else(|e| panic!("Invalid range separator regex: {e}"))
});

/// Split `"<from> to <to>"` into its two sides.
///
/// Input without a ` to ` separator is returned as a lone `from`.
#[must_use]
pub fn split_range_phrase(input: &str) -> (&str, Option<&str>) {
    let mut parts = RANGE_SEPARATOR.splitn(input.trim(), 2);
    let from = parts.next().unwrap_or_default();
    (from, parts.next())
}

/// Resolve a range relative to the current local time.
///
/// # Errors
///
/// See [`parse_date_range_at`].
pub fn parse_date_range(from: &str, to: Option<&str>) -> Result<CalendarRange, StructuredParseError> {
    parse_date_range_at(from, to, Local::now().naive_local(), &NaturalLanguage)
}

/// Resolve a range relative to `now`.
///
/// A lone period name (`today`, `last week`, `this quarter`) yields that
/// period. Otherwise both sides resolve as timestamps, a missing `to` meaning
/// `now`, and the start must come before the end.
///
/// # Errors
///
/// Returns a timestamp error if either side fails to resolve, or a date range
/// error if the range is empty or inverted.
pub fn parse_date_range_at<R>(
    from: &str,
    to: Option<&str>,
    now: NaiveDateTime,
    resolver: &R,
) -> Result<CalendarRange, StructuredParseError>
where
    R: NaturalDateResolver + ?Sized,
{
    if to.is_none() {
        if let Some(range) = period_by_name(from, now) {
            return Ok(range);
        }
    }

    let start = parse_timestamp_at(from, now, resolver)?;
    let end = match to {
        Some(to) => parse_timestamp_at(to, now, resolver)?,
        None => now,
    };

    if start >= end {
        let input = to.map_or_else(|| from.to_string(), |to| format!("{from} to {to}"));
        return Err(StructuredParseError::new(
            ParseKind::DateRange,
            input,
            "range start must be before its end",
        )
        .with_suggestion("put the earlier time first"));
    }

    Ok(CalendarRange { start, end })
}

/// `today`, `yesterday`, or a `this|last <unit>` phrase, with `_`/`-` as spaces.
fn period_by_name(name: &str, now: NaiveDateTime) -> Option<CalendarRange> {
    let name = name.trim().to_lowercase().replace(['_', '-'], " ");

    match name.as_str() {
        "today" => Some(period_range(now, PeriodUnit::Day, 0)),
        "yesterday" => Some(period_range(now, PeriodUnit::Day, 1)),
        _ => PeriodPhrase::parse(&name)
            .map(|phrase| period_range(now, phrase.unit, phrase.periods_back)),
    }
}
