//! Deadline parsing.
//!
//! Deadlines always resolve to the future. A time that already passed today
//! means the same time tomorrow; anything else in the past is rejected.

use chrono::{Duration, Local, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::errors::{
    deadline_past_error, deadline_required_error, deadline_shorthand_error,
    deadline_unresolved_error, StructuredParseError,
};
use crate::parser::natural::{NaturalDateResolver, NaturalLanguage};

/// A resolved future instant or the reason it could not be resolved.
pub type DeadlineResult = Result<NaiveDateTime, StructuredParseError>;

static SHORTHAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+(-?\d+)([a-zA-Z]+)$")
        .unwrap_or_else(|e| panic!("Invalid shorthand regex: {e}"))
});

/// Parse a deadline relative to the current local time.
///
/// # Errors
///
/// See [`parse_deadline_at`].
pub fn parse_deadline(input: &str) -> DeadlineResult {
    parse_deadline_at(input, Local::now().naive_local(), &NaturalLanguage)
}

/// Join command tokens and parse them as a deadline.
///
/// # Errors
///
/// Fails with "deadline is required" when `args` is empty, otherwise see
/// [`parse_deadline_at`].
pub fn parse_deadline_args<S: AsRef<str>>(args: &[S]) -> DeadlineResult {
    parse_deadline_args_at(args, Local::now().naive_local(), &NaturalLanguage)
}

/// [`parse_deadline_args`] against an explicit `now` and resolver.
///
/// # Errors
///
/// See [`parse_deadline_args`].
pub fn parse_deadline_args_at<S, R>(args: &[S], now: NaiveDateTime, resolver: &R) -> DeadlineResult
where
    S: AsRef<str>,
    R: NaturalDateResolver + ?Sized,
{
    if args.is_empty() {
        return Err(deadline_required_error());
    }

    let joined = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    parse_deadline_at(&joined, now, resolver)
}

/// Parse a deadline relative to `now`.
///
/// Accepts the shorthand `+<n><unit>` (`s`, `m`, `h`, `d`, `w`) or anything
/// `resolver` understands, asking it for the upcoming reading of the text.
///
/// # Errors
///
/// - shorthand with a non-positive amount or an unknown unit
/// - text the resolver cannot understand
/// - an instant at or before `now` on an earlier day
pub fn parse_deadline_at<R>(input: &str, now: NaiveDateTime, resolver: &R) -> DeadlineResult
where
    R: NaturalDateResolver + ?Sized,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(deadline_required_error());
    }

    if let Some(caps) = SHORTHAND_PATTERN.captures(trimmed) {
        let amount = caps.get(1).map_or("", |m| m.as_str());
        let unit = caps.get(2).map_or("", |m| m.as_str());
        return parse_shorthand(input, amount, unit, now);
    }

    let resolved = resolver
        .resolve_upcoming(trimmed, now)
        .map_err(|cause| deadline_unresolved_error(input, &cause))?;

    ensure_future(input, resolved, now)
}

fn parse_shorthand(input: &str, amount: &str, unit: &str, now: NaiveDateTime) -> DeadlineResult {
    let Ok(amount) = amount.parse::<i64>() else {
        return Err(deadline_shorthand_error(input, "amount is too large"));
    };
    if amount <= 0 {
        return Err(deadline_shorthand_error(input, "amount must be positive"));
    }

    let offset = match unit {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => {
            return Err(deadline_shorthand_error(
                input,
                &format!("invalid time unit '{unit}'"),
            ))
        },
    };

    offset
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| deadline_shorthand_error(input, "amount is too large"))
}

/// Apply the same-day rollover rule.
fn ensure_future(input: &str, resolved: NaiveDateTime, now: NaiveDateTime) -> DeadlineResult {
    if resolved > now {
        return Ok(resolved);
    }

    if resolved.date() == now.date() {
        let rolled = resolved + Duration::days(1);
        debug!("deadline '{input}' already passed today, rolled to {rolled}");
        return Ok(rolled);
    }

    Err(deadline_past_error(input))
}
