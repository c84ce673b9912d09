//! clockin - temporal expression parsing for time tracking
//!
//! This crate turns loosely structured command input (positional tokens,
//! durations, timestamps, deadlines, and named calendar periods) into typed
//! values, or into structured errors that show valid examples.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::ClockinError;
