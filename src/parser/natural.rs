//! Natural language date resolution.
//!
//! Parsers reach free-form phrases only through [`NaturalDateResolver`], so
//! the date library behind it can be swapped or mocked. The default
//! [`NaturalLanguage`] resolver understands a small built-in grammar and
//! hands everything else to `two_timer`.

use std::panic::{self, AssertUnwindSafe};

use chrono::{
    DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::duration::parse_duration;

/// Longest input handed to a resolver.
pub const MAX_NATURAL_INPUT_LEN: usize = 256;

/// Longest digit run handed to `two_timer`; larger counts overflow its date arithmetic.
const MAX_DELEGATED_DIGITS: usize = 5;

/// Resolves free-form date text against a reference instant.
#[cfg_attr(test, mockall::automock)]
pub trait NaturalDateResolver {
    /// Resolve `text` to a local instant, reading relative phrases against `now`.
    ///
    /// # Errors
    ///
    /// Returns a human readable cause when the text is not understood.
    fn resolve(&self, text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, String>;

    /// Like [`resolve`](Self::resolve), but an ambiguous phrase such as a bare
    /// weekday picks the upcoming occurrence instead of the most recent one.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    fn resolve_upcoming(&self, text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, String> {
        self.resolve(text, now)
    }
}

/// Built-in grammar with a `two_timer` fallback.
///
/// Built-in phrases:
/// - `now`, `today`, `tomorrow`, `yesterday`, optionally followed by a time
/// - times of day: `9am`, `9:30 pm`, `15:00`, `noon`, `morning`, `evening`
/// - `2 hours ago`, `1h30m ago`, `in 3 days`, `2 weeks ago`
/// - `next monday`, `last friday 3pm`
/// - `2026-01-15`, `2026-01-15 14:30`, RFC 3339
/// - `dec 15`, `december 15 9am` (current year), `feb 29 2028`
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalLanguage;

impl NaturalDateResolver for NaturalLanguage {
    fn resolve(&self, text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, String> {
        resolve_natural(text, now, true)
    }

    fn resolve_upcoming(&self, text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, String> {
        resolve_natural(text, now, false)
    }
}

fn resolve_natural(text: &str, now: NaiveDateTime, default_to_past: bool) -> Result<NaiveDateTime, String> {
    let text = text.trim().to_lowercase();

    if text.is_empty() {
        return Err("no date or time given".to_string());
    }
    if text.len() > MAX_NATURAL_INPUT_LEN {
        return Err(format!("input longer than {MAX_NATURAL_INPUT_LEN} characters"));
    }

    if let Some(result) = resolve_builtin(&text, now) {
        debug!("'{text}' resolved by built-in grammar");
        return result;
    }

    if DIGIT_RUN_PATTERN
        .find_iter(&text)
        .any(|run| run.as_str().len() > MAX_DELEGATED_DIGITS)
    {
        return Err(format!("'{text}' contains a number too large for a date"));
    }

    debug!("'{text}' delegated to two_timer (default_to_past={default_to_past})");
    let config = two_timer::Config::new().now(now).default_to_past(default_to_past);

    // two_timer does unchecked date arithmetic; an overflow there must not take down the caller.
    panic::catch_unwind(AssertUnwindSafe(|| two_timer::parse(&text, Some(config))))
        .map_err(|_| format!("'{text}' is out of the supported date range"))?
        .map(|(start, _end, _)| start)
        .map_err(|e| format!("could not understand date: {e:?}"))
}

static DIGIT_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").unwrap_or_else(|e| panic!("Invalid digit run regex: {e}")));

static RELATIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(in)\s+)?(\d+)\s*([a-z]+)(?:\s+(ago))?$")
        .unwrap_or_else(|e| panic!("Invalid relative regex: {e}"))
});

static DAY_WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(today|tomorrow|yesterday)(?:\s+(?:at\s+)?(.+))?$")
        .unwrap_or_else(|e| panic!("Invalid day word regex: {e}"))
});

static TIME_THEN_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+(today|tomorrow|yesterday)$")
        .unwrap_or_else(|e| panic!("Invalid time/day regex: {e}"))
});

static WEEKDAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(next|last)\s+([a-z]+)(?:\s+(?:at\s+)?(.+))?$")
        .unwrap_or_else(|e| panic!("Invalid weekday regex: {e}"))
});

static MONTH_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+)\s+(\d{1,2})(?:,?\s+(\d{4}))?(?:,?\s+(?:at\s+)?(.+))?$")
        .unwrap_or_else(|e| panic!("Invalid month/day regex: {e}"))
});

static TWELVE_HOUR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)$")
        .unwrap_or_else(|e| panic!("Invalid 12-hour regex: {e}"))
});

/// Try the built-in grammar. `None` means the phrase is not recognized at all.
fn resolve_builtin(text: &str, now: NaiveDateTime) -> Option<Result<NaiveDateTime, String>> {
    let text = text.strip_prefix("at ").unwrap_or(text);

    if text == "now" {
        return Some(Ok(now));
    }

    if let Some(result) = resolve_relative(text, now) {
        return Some(result);
    }

    if let Some(caps) = DAY_WORD_PATTERN.captures(text) {
        let date = shift_day(now.date(), caps.get(1)?.as_str());
        return match caps.get(2) {
            None => Some(Ok(at_midnight(date))),
            Some(time) => parse_time(time.as_str()).map(|t| Ok(date.and_time(t))),
        };
    }

    if let Some(caps) = TIME_THEN_DAY_PATTERN.captures(text) {
        if let Some(time) = parse_time(caps.get(1)?.as_str()) {
            let date = shift_day(now.date(), caps.get(2)?.as_str());
            return Some(Ok(date.and_time(time)));
        }
    }

    if let Some(time) = parse_time(text) {
        return Some(Ok(now.date().and_time(time)));
    }

    if let Some(caps) = WEEKDAY_PATTERN.captures(text) {
        if let Some(weekday) = parse_weekday(caps.get(2)?.as_str()) {
            let date = relative_weekday(now.date(), weekday, caps.get(1)?.as_str() == "next");
            return match caps.get(3) {
                None => Some(Ok(at_midnight(date))),
                Some(time) => parse_time(time.as_str()).map(|t| Ok(date.and_time(t))),
            };
        }
    }

    if let Some(instant) = parse_iso(text) {
        return Some(Ok(instant));
    }

    if let Some(caps) = MONTH_DAY_PATTERN.captures(text) {
        if let Some(month) = parse_month_name(caps.get(1)?.as_str()) {
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            let year = match caps.get(3) {
                Some(year) => year.as_str().parse().ok()?,
                None => now.year(),
            };

            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                // Feb 29 outside a leap year is left to the resolver.
                if caps.get(3).is_none() && NaiveDate::from_ymd_opt(2000, month, day).is_some() {
                    return None;
                }
                return Some(Err(format!("{} has no day {day}", caps.get(1)?.as_str())));
            };
            return match caps.get(4) {
                None => Some(Ok(at_midnight(date))),
                Some(time) => parse_time(time.as_str()).map(|t| Ok(date.and_time(t))),
            };
        }
    }

    None
}

/// `2 hours ago`, `1h30m ago`, `in 3 days`, `2 weeks ago`.
fn resolve_relative(text: &str, now: NaiveDateTime) -> Option<Result<NaiveDateTime, String>> {
    let (amount, forward) = if let Some(rest) = text.strip_suffix(" ago") {
        (rest.trim(), false)
    } else if let Some(rest) = text.strip_prefix("in ") {
        (rest.trim(), true)
    } else {
        return None;
    };

    if amount.starts_with(['+', '-']) {
        return Some(Err(format!("'{amount}' must not carry a sign")));
    }

    let offset = parse_duration(amount);
    if offset.valid {
        let result = if forward {
            now.checked_add_signed(offset.duration)
        } else {
            now.checked_sub_signed(offset.duration)
        };
        return Some(result.ok_or_else(|| format!("'{amount}' is out of range")));
    }

    let caps = RELATIVE_PATTERN.captures(text)?;
    let n: u32 = match caps.get(2)?.as_str().parse() {
        Ok(n) => n,
        Err(_) => return Some(Err(format!("'{amount}' is out of range"))),
    };

    let result = match caps.get(3)?.as_str() {
        "d" | "day" | "days" => shift(now, Duration::days(i64::from(n)), forward),
        "w" | "wk" | "wks" | "week" | "weeks" => shift(now, Duration::weeks(i64::from(n)), forward),
        "month" | "months" | "mo" => shift_months(now, n, forward),
        "y" | "yr" | "yrs" | "year" | "years" => shift_months(now, n.saturating_mul(12), forward),
        _ => return None,
    };

    Some(result.ok_or_else(|| format!("'{amount}' is out of range")))
}

fn shift(now: NaiveDateTime, by: Duration, forward: bool) -> Option<NaiveDateTime> {
    if forward {
        now.checked_add_signed(by)
    } else {
        now.checked_sub_signed(by)
    }
}

fn shift_months(now: NaiveDateTime, n: u32, forward: bool) -> Option<NaiveDateTime> {
    if forward {
        now.checked_add_months(Months::new(n))
    } else {
        now.checked_sub_months(Months::new(n))
    }
}

fn shift_day(today: NaiveDate, word: &str) -> NaiveDate {
    match word {
        "tomorrow" => today.succ_opt().unwrap_or(today),
        "yesterday" => today.pred_opt().unwrap_or(today),
        _ => today,
    }
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

/// Next (strictly after) or last (strictly before) occurrence of `target`.
fn relative_weekday(today: NaiveDate, target: Weekday, next: bool) -> NaiveDate {
    let today_index = i64::from(today.weekday().num_days_from_monday());
    let target_index = i64::from(target.num_days_from_monday());

    if next {
        let mut days = (target_index - today_index).rem_euclid(7);
        if days == 0 {
            days = 7;
        }
        today + Duration::days(days)
    } else {
        let mut days = (today_index - target_index).rem_euclid(7);
        if days == 0 {
            days = 7;
        }
        today - Duration::days(days)
    }
}

fn parse_weekday(input: &str) -> Option<Weekday> {
    match input {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// ISO 8601 dates and datetimes, with or without offset.
fn parse_iso(input: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(at_midnight(date));
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dt%H:%M", "%Y-%m-%dt%H:%M:%S"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(input, format) {
            return Some(instant);
        }
    }

    DateTime::parse_from_rfc3339(&input.to_uppercase())
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Parse a time of day.
fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();

    match input {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {},
    }

    // 24-hour format (15:00, 15:30:15)
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return Some(time);
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M:%S") {
        return Some(time);
    }

    // 12-hour format (3pm, 3:30pm, 3 pm)
    let caps = TWELVE_HOUR_PATTERN.captures(input)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (caps.get(3)?.as_str(), hour) {
        ("am", 12) => 0,
        ("pm", h) if h < 12 => h + 12,
        (_, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
