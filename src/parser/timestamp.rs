//! Timestamp parsing.

use chrono::{Local, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::errors::{timestamp_error, StructuredParseError};
use crate::parser::natural::{NaturalDateResolver, NaturalLanguage};
use crate::parser::period::{period_start, PeriodUnit};

/// A resolved instant or the reason it could not be resolved.
pub type TimestampResult = Result<NaiveDateTime, StructuredParseError>;

static PERIOD_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(this|current|last|previous)\s+(hour|day|week|month|quarter|year)$")
        .unwrap_or_else(|e| panic!("Invalid period phrase regex: {e}"))
});

/// A `this|current|last|previous <unit>` phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodPhrase {
    /// The calendar unit named.
    pub unit: PeriodUnit,
    /// 0 for this/current, 1 for last/previous.
    pub periods_back: u32,
}

impl PeriodPhrase {
    /// Recognize a period phrase such as `this week` or `previous quarter`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let caps = PERIOD_PHRASE.captures(input.trim())?;
        let periods_back = match caps.get(1)?.as_str().to_lowercase().as_str() {
            "this" | "current" => 0,
            _ => 1,
        };
        let unit = PeriodUnit::parse(caps.get(2)?.as_str())?;
        Some(Self { unit, periods_back })
    }
}

/// Parse a timestamp phrase relative to the current local time.
///
/// # Errors
///
/// Returns a timestamp [`StructuredParseError`] if the phrase cannot be resolved.
pub fn parse_timestamp(input: &str) -> TimestampResult {
    parse_timestamp_at(input, Local::now().naive_local(), &NaturalLanguage)
}

/// Parse a timestamp phrase relative to `now`.
///
/// Empty input and `now` resolve to `now`. Period phrases (`this week`,
/// `last quarter`) resolve to the start of that period with Monday-based
/// weeks. Everything else goes to `resolver`.
///
/// # Errors
///
/// Returns a timestamp [`StructuredParseError`] if the resolver fails.
pub fn parse_timestamp_at<R>(input: &str, now: NaiveDateTime, resolver: &R) -> TimestampResult
where
    R: NaturalDateResolver + ?Sized,
{
    let trimmed = input.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Some(phrase) = PeriodPhrase::parse(trimmed) {
        debug!("timestamp '{trimmed}' is a period phrase");
        return Ok(period_start(now, phrase.unit, phrase.periods_back));
    }

    resolver
        .resolve(trimmed, now)
        .map_err(|cause| timestamp_error(input, &cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ParseKind;
    use crate::parser::natural::MockNaturalDateResolver;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2026, 1, 15, 18, 0)
    }

    fn parse(input: &str) -> TimestampResult {
        parse_timestamp_at(input, now(), &NaturalLanguage)
    }

    #[test]
    fn test_empty_and_now() {
        assert_eq!(parse(""), Ok(now()));
        assert_eq!(parse("   "), Ok(now()));
        assert_eq!(parse("NOW"), Ok(now()));
    }

    #[test]
    fn test_period_phrases() {
        assert_eq!(parse("this week"), Ok(at(2026, 1, 12, 0, 0)));
        assert_eq!(parse("last week"), Ok(at(2026, 1, 5, 0, 0)));
        assert_eq!(parse("Current Month"), Ok(at(2026, 1, 1, 0, 0)));
        assert_eq!(parse("previous month"), Ok(at(2025, 12, 1, 0, 0)));
        assert_eq!(parse("this quarter"), Ok(at(2026, 1, 1, 0, 0)));
        assert_eq!(parse("last quarter"), Ok(at(2025, 10, 1, 0, 0)));
        assert_eq!(parse("this year"), Ok(at(2026, 1, 1, 0, 0)));
        assert_eq!(parse("last hour"), Ok(at(2026, 1, 15, 17, 0)));
        assert_eq!(parse("this day"), Ok(at(2026, 1, 15, 0, 0)));
    }

    #[test]
    fn test_this_week_is_monday() {
        let start = parse("this week").unwrap();
        assert_eq!(start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_natural_phrases() {
        assert_eq!(parse("9am"), Ok(at(2026, 1, 15, 9, 0)));
        assert_eq!(parse("2 hours ago"), Ok(at(2026, 1, 15, 16, 0)));
        assert_eq!(parse("yesterday 3pm"), Ok(at(2026, 1, 14, 15, 0)));
    }

    #[test]
    fn test_period_phrase_bypasses_resolver() {
        let mut mock = MockNaturalDateResolver::new();
        mock.expect_resolve().never();

        assert_eq!(parse_timestamp_at("this week", now(), &mock), Ok(at(2026, 1, 12, 0, 0)));
        assert_eq!(parse_timestamp_at("now", now(), &mock), Ok(now()));
    }

    #[test]
    fn test_resolver_failure_becomes_structured_error() {
        let mut mock = MockNaturalDateResolver::new();
        mock.expect_resolve()
            .returning(|_, _| Err("nope".to_string()));

        let err = parse_timestamp_at(" blorp ", now(), &mock).unwrap_err();
        assert_eq!(err.kind, ParseKind::Timestamp);
        assert_eq!(err.input, " blorp ");
        assert_eq!(err.message, "nope");
        assert!(!err.examples.is_empty());
    }

    #[test]
    fn test_resolver_sees_trimmed_input() {
        let mut mock = MockNaturalDateResolver::new();
        mock.expect_resolve()
            .withf(|text, _| text.to_string() == "next friday")
            .returning(|_, _| Ok(at(2026, 1, 16, 0, 0)));

        assert_eq!(parse_timestamp_at("  next friday ", now(), &mock), Ok(at(2026, 1, 16, 0, 0)));
    }

    #[test]
    fn test_idempotent_for_fixed_now() {
        for input in ["9am", "this week", "2 hours ago", "tomorrow"] {
            assert_eq!(parse(input), parse(input));
        }
    }

    #[test]
    fn test_period_phrase_parse() {
        assert_eq!(
            PeriodPhrase::parse("previous quarter"),
            Some(PeriodPhrase { unit: PeriodUnit::Quarter, periods_back: 1 })
        );
        assert_eq!(PeriodPhrase::parse("next week"), None);
        assert_eq!(PeriodPhrase::parse("this fortnight"), None);
    }
}
