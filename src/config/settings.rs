//! The `config.yaml` schema.
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::ClockinError;

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
}

/// The `general:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Used when `--output` is absent.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`; `-v` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    /// `log_level` as a [`LevelFilter`].
    ///
    /// # Errors
    ///
    /// Fails on an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, ClockinError> {
        self.log_level
            .parse()
            .map_err(|_| ClockinError::Config(format!("Unknown log level '{}'", self.log_level)))
    }
}

impl Config {
    /// Read `path`, or return defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but is unreadable or not valid YAML for this schema.
    pub fn load_from_path(path: &Path) -> Result<Self, ClockinError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClockinError::Config(format!("Cannot read {}: {e}", path.display())))?;

        serde_yaml::from_str(&raw)
            .map_err(|e| ClockinError::Config(format!("Cannot parse {}: {e}", path.display())))
    }

    /// Write to `paths.config_file`, creating the directory first.
    ///
    /// # Errors
    ///
    /// Fails if the directory or the file cannot be written.
    pub fn save(&self, paths: &Paths) -> Result<(), ClockinError> {
        paths.ensure_dirs()?;
        let yaml = serde_yaml::to_string(self)?;

        std::fs::write(&paths.config_file, yaml).map_err(|e| {
            ClockinError::Config(format!("Cannot write {}: {e}", paths.config_file.display()))
        })
    }
}
