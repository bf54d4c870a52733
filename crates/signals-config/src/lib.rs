//! Configuration management.
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! environment variables such as `SIGNALS__POLICY__NAME=trend`.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataSettings, JournalSettings, LoggingConfig, PolicySettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SIGNALS";

fn build(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, true)
}

/// Like [`load_config`], but a missing file falls back to defaults.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, false)
}
