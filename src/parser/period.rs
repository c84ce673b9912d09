//! Calendar period boundaries.
//!
//! All ranges are half-open `[start, end)` in local wall-clock time. Weeks
//! start on Monday.

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Granularity of a calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodUnit {
    /// Parse a unit word (`hour`, `day`, `week`, `month`, `quarter`, `year`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Move `start` forward by `n` units.
    fn advance(self, start: NaiveDateTime, n: u32) -> NaiveDateTime {
        match self {
            Self::Hour => start + Duration::hours(i64::from(n)),
            Self::Day => start + Duration::days(i64::from(n)),
            Self::Week => start + Duration::weeks(i64::from(n)),
            Self::Month => start + Months::new(n),
            Self::Quarter => start + Months::new(n * 3),
            Self::Year => start + Months::new(n * 12),
        }
    }

    /// Move `start` back by `n` units.
    fn rewind(self, start: NaiveDateTime, n: u32) -> NaiveDateTime {
        match self {
            Self::Hour => start - Duration::hours(i64::from(n)),
            Self::Day => start - Duration::days(i64::from(n)),
            Self::Week => start - Duration::weeks(i64::from(n)),
            Self::Month => start - Months::new(n),
            Self::Quarter => start - Months::new(n * 3),
            Self::Year => start - Months::new(n * 12),
        }
    }
}

/// A half-open `[start, end)` range of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarRange {
    /// First instant inside the range.
    pub start: NaiveDateTime,
    /// First instant after the range.
    pub end: NaiveDateTime,
}

impl CalendarRange {
    /// Whether `instant` falls inside the range.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Width of the range.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// The named periods accepted by reporting filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedPeriod {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

impl NamedPeriod {
    /// Recognize a period name by substring, e.g. `this_week`, `Last Month`.
    ///
    /// Week, month and year names mean the current period only when they
    /// mention `this` or `current`; otherwise they mean the previous one.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let current = name.contains("this") || name.contains("current");

        if name.contains("yesterday") {
            Some(Self::Yesterday)
        } else if name.contains("today") {
            Some(Self::Today)
        } else if name.contains("week") {
            Some(if current { Self::ThisWeek } else { Self::LastWeek })
        } else if name.contains("month") {
            Some(if current { Self::ThisMonth } else { Self::LastMonth })
        } else if name.contains("year") {
            Some(if current { Self::ThisYear } else { Self::LastYear })
        } else {
            None
        }
    }

    /// Like [`NamedPeriod::parse`], defaulting to [`NamedPeriod::Today`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Today)
    }

    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this week",
            Self::LastWeek => "last week",
            Self::ThisMonth => "this month",
            Self::LastMonth => "last month",
            Self::ThisYear => "this year",
            Self::LastYear => "last year",
        }
    }

    /// Unit and number of periods back from the current one.
    const fn unit_and_offset(self) -> (PeriodUnit, u32) {
        match self {
            Self::Today => (PeriodUnit::Day, 0),
            Self::Yesterday => (PeriodUnit::Day, 1),
            Self::ThisWeek => (PeriodUnit::Week, 0),
            Self::LastWeek => (PeriodUnit::Week, 1),
            Self::ThisMonth => (PeriodUnit::Month, 0),
            Self::LastMonth => (PeriodUnit::Month, 1),
            Self::ThisYear => (PeriodUnit::Year, 0),
            Self::LastYear => (PeriodUnit::Year, 1),
        }
    }

    /// The range this period covers relative to `now`.
    #[must_use]
    pub fn range_at(self, now: NaiveDateTime) -> CalendarRange {
        let (unit, back) = self.unit_and_offset();
        period_range(now, unit, back)
    }
}

impl std::fmt::Display for NamedPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Range for a period name relative to the current local time.
///
/// Unrecognized names fall back to today.
#[must_use]
pub fn get_period_range(name: &str) -> CalendarRange {
    get_period_range_at(name, Local::now().naive_local())
}

/// Range for a period name relative to `now`.
#[must_use]
pub fn get_period_range_at(name: &str, now: NaiveDateTime) -> CalendarRange {
    NamedPeriod::from_name(name).range_at(now)
}

/// Start of the period `periods_back` units before the one containing `now`.
///
/// ```
/// use chrono::NaiveDate;
/// use clockin::parser::{period_start, PeriodUnit};
///
/// // Thursday 2026-01-15
/// let now = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(period_start(now, PeriodUnit::Week, 0), monday);
/// ```
#[must_use]
pub fn period_start(now: NaiveDateTime, unit: PeriodUnit, periods_back: u32) -> NaiveDateTime {
    let today = now.date();

    let current = match unit {
        PeriodUnit::Hour => now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now),
        PeriodUnit::Day => midnight(today),
        PeriodUnit::Week => {
            midnight(today - Duration::days(i64::from(today.weekday().num_days_from_monday())))
        },
        PeriodUnit::Month => midnight(first_of_month(today)),
        PeriodUnit::Quarter => midnight(first_of_month(today)) - Months::new(today.month0() % 3),
        PeriodUnit::Year => midnight(today - Duration::days(i64::from(today.ordinal0()))),
    };

    unit.rewind(current, periods_back)
}

/// The full `[start, end)` range of the period `periods_back` units before now.
#[must_use]
pub fn period_range(now: NaiveDateTime, unit: PeriodUnit, periods_back: u32) -> CalendarRange {
    let start = period_start(now, unit, periods_back);
    CalendarRange {
        start,
        end: unit.advance(start, 1),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}
