//! Configuration management.
//!
//! Settings come from a TOML document with `HASE__*` environment variables
//! layered on top, e.g. `HASE__STRATEGY__EMA_PERIOD=100`. The strategy
//! section is validated before it is handed back.

mod settings;

pub use settings::{AppConfig, LogFormat, LoggingConfig};

use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use thiserror::Error;

/// Failure to produce a usable configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] hase_core::ConfigError),
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    build(Config::builder().add_source(File::from(path).required(true)))
}

/// Load configuration from a TOML string and environment.
pub fn load_config_str(toml: &str) -> Result<AppConfig, SettingsError> {
    build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<AppConfig, SettingsError> {
    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix("HASE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.strategy.validate()?;
    Ok(config)
}

/// Render a configuration back to TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
