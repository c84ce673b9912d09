//! Configuration management for clockin.
//!
//! Settings live in `~/.clockin/config.yaml`, or under `$CLOCKIN_HOME` when set.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig};
