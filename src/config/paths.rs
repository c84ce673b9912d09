//! Path resolution for clockin configuration files.

use std::path::PathBuf;

use crate::error::ClockinError;

/// Environment variable that overrides the configuration directory.
pub const HOME_ENV: &str = "CLOCKIN_HOME";

/// Paths to the clockin configuration directory and its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.clockin/`
    pub root: PathBuf,
    /// Config file: `~/.clockin/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$CLOCKIN_HOME`, falling back to `$HOME/.clockin`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, ClockinError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME")
            .ok_or_else(|| ClockinError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".clockin")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }

    /// Create the root directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), ClockinError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                ClockinError::Config(format!("Failed to create directory {}: {e}", self.root.display()))
            })?;
        }
        Ok(())
    }
}
