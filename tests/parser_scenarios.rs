//! End-to-end parsing scenarios through the public API.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use clockin::parser::{
    extract_args, get_period_range_at, parse_deadline, parse_deadline_at, parse_duration, parse_timestamp,
    parse_timestamp_at, FlagOverrides, NaturalDateResolver, NaturalLanguage, ParseKind, ParsedArgs,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Resolves every phrase to the same instant.
struct FixedResolver(NaiveDateTime);

impl NaturalDateResolver for FixedResolver {
    fn resolve(&self, _text: &str, _now: NaiveDateTime) -> Result<NaiveDateTime, String> {
        Ok(self.0)
    }
}

// ===================
// Duration
// ===================

#[test]
fn duration_scenarios() {
    assert_eq!(parse_duration("1h30m").duration, Duration::minutes(90));
    assert_eq!(parse_duration("2.5h").duration, Duration::minutes(150));

    let zero = parse_duration("0h");
    assert!(zero.valid);
    assert_eq!(zero.duration, Duration::zero());
}

#[test]
fn valid_nonzero_durations_are_positive() {
    for input in ["45s", "2h", "1.5 hours", "90 minutes", "1 hour 30 minutes", "3"] {
        let result = parse_duration(input);
        assert!(result.valid, "{input}");
        assert!(result.duration > Duration::zero(), "{input}");
    }
}

#[test]
fn invalid_durations_carry_zero() {
    for input in ["", "   ", "soon", "1h and a bit", "h"] {
        let result = parse_duration(input);
        assert!(!result.valid, "{input}");
        assert_eq!(result.duration, Duration::zero(), "{input}");
    }
}

// ===================
// Deadlines
// ===================

#[test]
fn rollover_scenario() {
    let now = at(2026, 1, 15, 18, 0);
    assert_eq!(parse_deadline_at("5pm", now, &NaturalLanguage), Ok(at(2026, 1, 16, 17, 0)));
}

#[test]
fn relative_shorthand_against_live_clock() {
    let before = chrono::Local::now().naive_local();
    let deadline = parse_deadline("+90m").unwrap();
    let after = chrono::Local::now().naive_local();

    assert!(deadline >= before + Duration::minutes(90));
    assert!(deadline <= after + Duration::minutes(90));
}

#[test]
fn resolved_deadlines_are_future() {
    let now = at(2026, 1, 15, 18, 0);
    for input in ["+1s", "+2d", "9am", "tomorrow", "next monday", "in 3 hours"] {
        let deadline = parse_deadline_at(input, now, &NaturalLanguage).unwrap();
        assert!(deadline > now, "{input}");
    }
}

#[test]
fn bare_weekday_deadline_is_upcoming() {
    let thursday = at(2026, 1, 15, 18, 0);
    assert_eq!(parse_deadline_at("friday", thursday, &NaturalLanguage), Ok(at(2026, 1, 16, 0, 0)));
}

#[test]
fn deadline_seam_uses_custom_resolver() {
    let now = at(2026, 1, 15, 18, 0);
    let resolver = FixedResolver(at(2026, 3, 1, 12, 0));
    assert_eq!(parse_deadline_at("the first of march", now, &resolver), Ok(at(2026, 3, 1, 12, 0)));

    let past = FixedResolver(at(2026, 1, 1, 12, 0));
    let err = parse_deadline_at("new year", now, &past).unwrap_err();
    assert_eq!(err.kind, ParseKind::Deadline);
}

// ===================
// Timestamps and periods
// ===================

#[test]
fn timestamp_idempotent_within_tolerance() {
    for input in ["now", "9am", "2 hours ago", "this week"] {
        let first = parse_timestamp(input).unwrap();
        let second = parse_timestamp(input).unwrap();
        assert!((second - first).num_seconds().abs() <= 2, "{input}");
    }
}

#[test]
fn period_phrase_bypasses_resolver() {
    let now = at(2026, 1, 15, 18, 0);
    let resolver = FixedResolver(at(1999, 1, 1, 0, 0));
    assert_eq!(parse_timestamp_at("this quarter", now, &resolver), Ok(at(2026, 1, 1, 0, 0)));
}

#[test]
fn period_ranges_are_ordered() {
    let now = chrono::Local::now().naive_local();
    for name in ["today", "yesterday", "this week", "last week", "this month", "last month", "this year", "last year"] {
        let range = get_period_range_at(name, now);
        assert!(range.start < range.end, "{name}");
    }
    assert_eq!(get_period_range_at("this week", now).start.weekday(), Weekday::Mon);
}

// ===================
// Argument extraction
// ===================

#[test]
fn extractor_scenario() {
    let parsed = extract_args(&["on", "myproject/mytask", "9am", "to", "5pm", "with", "note", "\"standup\""]);

    assert_eq!(parsed.project_sid, "myproject");
    assert_eq!(parsed.task_sid, "mytask");
    assert_eq!(parsed.note, "standup");
    assert_eq!(parsed.start_raw, "9am");
    assert_eq!(parsed.end_raw, "5pm");
}

#[test]
fn merge_precedence_scenario() {
    let original = ParsedArgs {
        project_sid: "original".to_string(),
        has_project: true,
        ..ParsedArgs::default()
    };

    let mut overridden = original.clone();
    overridden.merge(&FlagOverrides {
        project: Some("override".to_string()),
        ..FlagOverrides::default()
    });
    assert_eq!(overridden.project_sid, "override");

    let mut untouched = original;
    untouched.merge(&FlagOverrides {
        project: Some(String::new()),
        ..FlagOverrides::default()
    });
    assert_eq!(untouched.project_sid, "original");
}

#[test]
fn extract_then_resolve() {
    let now = at(2026, 1, 15, 18, 0);
    let parsed = extract_args(&["on", "Backend", "2", "hours", "ago"]);
    let resolved = parsed.resolve_at(now, &NaturalLanguage).unwrap();

    assert_eq!(resolved.project_sid.as_deref(), Some("backend"));
    assert_eq!(resolved.start, at(2026, 1, 15, 16, 0));
    assert_eq!(resolved.end, None);
}

// ===================
// Adversarial input
// ===================

#[test]
fn parsers_never_panic() {
    let now = at(2026, 1, 15, 18, 0);
    let huge = "9".repeat(10_000);
    let spaced = "a ".repeat(5_000);
    let inputs = [
        "",
        " ",
        "\t\n",
        "\"",
        "'",
        "+",
        "+m",
        "+999999999999999999999999h",
        "-1h",
        "1e9h",
        "99999999999999999999 days ago",
        "in 99999999999 years",
        "99999999 days before today",
        "99999 years after today",
        "-2h ago",
        "0.0000000001s",
        "feb 29",
        "µs",
        "日本語",
        "on / to / until",
        huge.as_str(),
        spaced.as_str(),
    ];

    for input in inputs {
        let _ = parse_duration(input);
        let _ = parse_timestamp_at(input, now, &NaturalLanguage);
        let _ = parse_deadline_at(input, now, &NaturalLanguage);
        let _ = get_period_range_at(input, now);
        let _ = extract_args(&[input]).resolve_at(now, &NaturalLanguage);
    }
}
