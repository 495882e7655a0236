//! Logging setup.

use hase_config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging(level: &str, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init()
    }
}

/// Install the global subscriber described by a `[logging]` section.
pub fn setup_from_config(config: &LoggingConfig) -> Result<(), TryInitError> {
    setup_logging(&config.level, config.is_json())
}
