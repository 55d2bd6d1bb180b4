//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the report.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Logging initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {message}")]
    Filter { filter: String, message: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber.
pub fn init_logging(config: &CliConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter {
        filter: config.log_level.clone(),
        message: e.to_string(),
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "logging initialized"
    );
    Ok(())
}
