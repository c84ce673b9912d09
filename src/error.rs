//! Error types for clockin.

use thiserror::Error;

use crate::parser::StructuredParseError;

/// Top-level error for the clockin library and binary.
#[derive(Error, Debug)]
pub enum ClockinError {
    /// User input could not be parsed.
    #[error(transparent)]
    Parse(#[from] StructuredParseError),

    /// Configuration could not be located, read, or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ClockinError {
    /// The structured parse error behind this error, if any.
    #[must_use]
    pub const fn as_parse_error(&self) -> Option<&StructuredParseError> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }

    /// Process exit code for this error.
    ///
    /// Parse errors are usage errors (2); everything else is a runtime failure (1).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) => 2,
            _ => 1,
        }
    }
}
