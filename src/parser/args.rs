//! Positional argument extraction.
//!
//! Commands such as `clockin args on api/auth 9am to 5pm with note "review"`
//! carry a project reference, a note and up to two timestamp phrases in free
//! order. [`extract_args`] splits them apart without resolving anything;
//! [`ParsedArgs::resolve_at`] turns the raw strings into typed values.

use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::parser::errors::StructuredParseError;
use crate::parser::natural::{NaturalDateResolver, NaturalLanguage};
use crate::parser::sid;
use crate::parser::timestamp::parse_timestamp_at;
use crate::parser::tokenizer::{classify, is_time_like, tokenize, TokenClass};

static NOTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bwith\s+note\s+(?:"([^"]*)"|'([^']*)')"#)
        .unwrap_or_else(|e| panic!("Invalid note regex: {e}"))
});

/// Raw fields pulled out of a command's positional arguments.
///
/// Only the presence flags and raw strings are meaningful until
/// [`resolve_at`](Self::resolve_at) runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArgs {
    pub project_sid: String,
    pub task_sid: String,
    pub note: String,
    pub start_raw: String,
    pub end_raw: String,
    pub has_project: bool,
    pub has_task: bool,
    pub has_note: bool,
    pub has_start: bool,
    pub has_end: bool,
}

/// Explicit flag values layered over extracted arguments.
///
/// `None` and empty strings both mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub project: Option<String>,
    pub task: Option<String>,
    pub note: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Typed values ready for a caller to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArgs {
    pub project_sid: Option<String>,
    pub task_sid: Option<String>,
    pub note: Option<String>,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl ResolvedArgs {
    /// Time between start and end, if an end was given.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }
}

/// Which timestamp the scanner is currently collecting tokens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Start,
    End,
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Collecting timestamp tokens.
    Collecting(Target),
    /// The previous keyword announced a project reference.
    ExpectProject(Target),
}

impl State {
    const fn target(self) -> Target {
        match self {
            Self::Collecting(target) | Self::ExpectProject(target) => target,
        }
    }
}

/// What a single token does to the scan.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Ignore,
    ExpectProject,
    SwitchToEnd,
    Push,
    SetProject,
}

struct Scanner {
    state: State,
    pending: Vec<String>,
    parsed: ParsedArgs,
}

impl Scanner {
    fn new(parsed: ParsedArgs) -> Self {
        Self {
            state: State::Collecting(Target::Start),
            pending: Vec::new(),
            parsed,
        }
    }

    /// The transition table.
    fn action(&self, class: TokenClass, token: &str) -> Action {
        match (self.state, class) {
            (_, TokenClass::Skip) => Action::Ignore,
            (_, TokenClass::ProjectIntroducer) => Action::ExpectProject,
            (_, TokenClass::EndIntroducer) => Action::SwitchToEnd,
            (_, TokenClass::ProjectOrEnd) => {
                if self.to_means_end() {
                    Action::SwitchToEnd
                } else {
                    Action::ExpectProject
                }
            },
            (State::ExpectProject(_), TokenClass::Word) if !is_time_like(token) => Action::SetProject,
            (_, TokenClass::Word) => Action::Push,
        }
    }

    /// `to` ends the start timestamp once anything start-related or a
    /// project has been seen.
    fn to_means_end(&self) -> bool {
        self.state.target() == Target::End
            || !self.pending.is_empty()
            || self.parsed.has_start
            || self.parsed.has_project
    }

    fn feed(&mut self, token: &str) {
        let class = classify(token);
        let action = self.action(class, token);
        trace!("token '{token}' {class:?} in {:?} -> {action:?}", self.state);

        let target = self.state.target();
        match action {
            Action::Ignore => {},
            Action::ExpectProject => self.state = State::ExpectProject(target),
            Action::SwitchToEnd => {
                self.flush();
                self.state = State::Collecting(Target::End);
            },
            Action::Push => {
                self.pending.push(token.to_string());
                self.state = State::Collecting(target);
            },
            Action::SetProject => {
                self.set_project(token);
                self.state = State::Collecting(target);
            },
        }
    }

    fn set_project(&mut self, token: &str) {
        let (project, task) = token.split_once('/').unwrap_or((token, ""));
        if !project.is_empty() {
            self.parsed.project_sid = project.to_string();
            self.parsed.has_project = true;
        }
        if !task.is_empty() {
            self.parsed.task_sid = task.to_string();
            self.parsed.has_task = true;
        }
    }

    /// Move pending tokens into the current target unless it is already set.
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let raw = self.pending.join(" ");
        self.pending.clear();

        let (slot, present) = match self.state.target() {
            Target::Start => (&mut self.parsed.start_raw, &mut self.parsed.has_start),
            Target::End => (&mut self.parsed.end_raw, &mut self.parsed.has_end),
        };
        if *present {
            debug!("dropping extra timestamp tokens '{raw}'");
            return;
        }
        *slot = raw;
        *present = true;
    }

    fn finish(mut self) -> ParsedArgs {
        self.flush();
        self.parsed
    }
}

/// Extract project, task, note, and raw timestamps from positional arguments.
///
/// ```
/// use clockin::parser::extract_args;
///
/// let parsed = extract_args(&["on", "api/auth", "2", "hours", "ago"]);
/// assert_eq!(parsed.project_sid, "api");
/// assert_eq!(parsed.task_sid, "auth");
/// assert_eq!(parsed.start_raw, "2 hours ago");
/// assert!(!parsed.has_end);
/// ```
#[must_use]
pub fn extract_args<S: AsRef<str>>(args: &[S]) -> ParsedArgs {
    let joined = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    let mut parsed = ParsedArgs::default();

    let note = NOTE_PATTERN.captures(&joined).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map_or_else(String::new, |m| m.as_str().to_string())
    });

    let remainder = match note {
        Some(note) => {
            parsed.note = note;
            parsed.has_note = true;
            NOTE_PATTERN.replace(&joined, " ").into_owned()
        },
        None => joined,
    };

    let mut scanner = Scanner::new(parsed);
    for token in tokenize(&remainder).iter().filter(|t| !t.is_empty()) {
        scanner.feed(token);
    }
    scanner.finish()
}

impl ParsedArgs {
    /// Apply explicit flag values. Provided values win, empty ones are ignored.
    pub fn merge(&mut self, flags: &FlagOverrides) {
        fn apply(value: Option<&str>, slot: &mut String, present: &mut bool) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value.to_string();
                *present = true;
            }
        }

        apply(flags.project.as_deref(), &mut self.project_sid, &mut self.has_project);
        apply(flags.task.as_deref(), &mut self.task_sid, &mut self.has_task);
        apply(flags.note.as_deref(), &mut self.note, &mut self.has_note);
        apply(flags.start.as_deref(), &mut self.start_raw, &mut self.has_start);
        apply(flags.end.as_deref(), &mut self.end_raw, &mut self.has_end);
    }

    /// Resolve against the current local time.
    ///
    /// # Errors
    ///
    /// See [`resolve_at`](Self::resolve_at).
    pub fn resolve(&self) -> Result<ResolvedArgs, StructuredParseError> {
        self.resolve_at(Local::now().naive_local(), &NaturalLanguage)
    }

    /// Resolve raw timestamps and normalize identifiers.
    ///
    /// A missing start means `now`.
    ///
    /// # Errors
    ///
    /// Returns a timestamp error if either raw timestamp cannot be resolved.
    pub fn resolve_at<R>(&self, now: NaiveDateTime, resolver: &R) -> Result<ResolvedArgs, StructuredParseError>
    where
        R: NaturalDateResolver + ?Sized,
    {
        let start = if self.has_start {
            parse_timestamp_at(&self.start_raw, now, resolver)?
        } else {
            now
        };

        let end = if self.has_end {
            Some(parse_timestamp_at(&self.end_raw, now, resolver)?)
        } else {
            None
        };

        Ok(ResolvedArgs {
            project_sid: self.has_project.then(|| sid::normalize(&self.project_sid)).flatten(),
            task_sid: self.has_task.then(|| sid::normalize(&self.task_sid)).flatten(),
            note: self.has_note.then(|| self.note.clone()),
            start,
            end,
        })
    }
}
