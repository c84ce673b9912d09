//! Temporal expression parsing.
//!
//! Turns loosely structured input (positional command tokens, durations,
//! timestamps, deadlines, and named calendar periods) into typed values or
//! a [`StructuredParseError`] carrying canonical examples.
//!
//! Every parser is a pure function of its input and a reference instant.
//! The convenience functions sample the local clock once per call; the
//! `*_at` variants take `now` and a [`NaturalDateResolver`] explicitly.

pub mod args;
pub mod deadline;
pub mod duration;
pub mod errors;
pub mod natural;
pub mod period;
pub mod range;
pub mod sid;
pub mod timestamp;
pub mod tokenizer;

pub use args::{extract_args, FlagOverrides, ParsedArgs, ResolvedArgs};
pub use deadline::{parse_deadline, parse_deadline_args, parse_deadline_args_at, parse_deadline_at, DeadlineResult};
pub use duration::{format_duration, is_duration_like, parse_duration, parse_duration_strict, DurationResult};
pub use errors::{ParseKind, StructuredParseError};
pub use natural::{NaturalDateResolver, NaturalLanguage};
pub use period::{
    get_period_range, get_period_range_at, period_range, period_start, CalendarRange, NamedPeriod, PeriodUnit,
};
pub use range::{parse_date_range, parse_date_range_at, split_range_phrase};
pub use timestamp::{parse_timestamp, parse_timestamp_at, PeriodPhrase, TimestampResult};
pub use tokenizer::tokenize;
