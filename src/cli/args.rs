use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::parser::FlagOverrides;

#[derive(Parser, Debug)]
#[command(name = "clockin")]
#[command(about = "Parse durations, timestamps, deadlines and periods the way a time tracker reads them")]
#[command(long_about = "clockin - temporal expression parsing for time tracking

Turns loosely written command input into exact values, or explains
what it expected when it cannot.

QUICK START:
  clockin duration 1h30m                    Parse a duration
  clockin timestamp yesterday 3pm           Resolve a point in time
  clockin deadline +2d                      Resolve a future deadline
  clockin period last week                  Show a calendar range
  clockin args on api/auth 9am to 5pm       Extract command arguments

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  clockin <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract project, task, note and times from free-form arguments
    ///
    /// Flags override anything read from the positional arguments.
    ///
    /// # Examples
    ///
    ///   clockin args on myproject/mytask 9am to 5pm with note "standup"
    ///   clockin args on backend 2 hours ago
    ///   clockin args on backend --start 9am
    Args(ArgsArgs),

    /// Parse a duration
    ///
    /// # Examples
    ///
    ///   clockin duration 1h30m
    ///   clockin duration 2.5 hours
    ///   clockin duration 1 hour 30 minutes
    #[command(alias = "d")]
    Duration {
        /// Duration phrase, joined with spaces
        #[arg(required = true)]
        input: Vec<String>,
    },

    /// Resolve a point in time
    ///
    /// # Examples
    ///
    ///   clockin timestamp 9am
    ///   clockin timestamp 2 hours ago
    ///   clockin timestamp last quarter
    #[command(alias = "ts")]
    Timestamp {
        /// Timestamp phrase, joined with spaces (empty means now)
        input: Vec<String>,
    },

    /// Resolve a future deadline
    ///
    /// A time that already passed today means the same time tomorrow.
    ///
    /// # Examples
    ///
    ///   clockin deadline +90m
    ///   clockin deadline 5pm
    ///   clockin deadline next friday
    Deadline {
        /// Deadline phrase, joined with spaces
        input: Vec<String>,
    },

    /// Show the [start, end) range of a named period
    ///
    /// Recognizes today, yesterday, this/last week, this/last month and
    /// this/last year. Anything else means today.
    ///
    /// # Examples
    ///
    ///   clockin period this week
    ///   clockin period last_month
    Period {
        /// Period name, joined with spaces
        name: Vec<String>,
    },

    /// Resolve a date range for reports
    ///
    /// # Examples
    ///
    ///   clockin range last quarter
    ///   clockin range yesterday to today
    ///   clockin range 2026-01-01 to 2026-01-31
    ///   clockin range 3 days ago
    Range {
        /// A period name, "<from> to <to>", or a start that runs until now
        #[arg(required = true)]
        input: Vec<String>,
    },

    /// Show or create the configuration file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Arguments for the `args` command.
#[derive(Args, Debug, Default)]
pub struct ArgsArgs {
    /// Free-form tokens such as: on project/task 9am to 5pm with note "text"
    pub tokens: Vec<String>,

    /// Project, overriding the positional arguments
    #[arg(long)]
    pub project: Option<String>,

    /// Task, overriding the positional arguments
    #[arg(long)]
    pub task: Option<String>,

    /// Note, overriding the positional arguments
    #[arg(long)]
    pub note: Option<String>,

    /// Start time, overriding the positional arguments
    #[arg(long)]
    pub start: Option<String>,

    /// End time, overriding the positional arguments
    #[arg(long)]
    pub end: Option<String>,
}

impl From<&ArgsArgs> for FlagOverrides {
    fn from(args: &ArgsArgs) -> Self {
        Self {
            project: args.project.clone(),
            task: args.task.clone(),
            note: args.note.clone(),
            start: args.start.clone(),
            end: args.end.clone(),
        }
    }
}
