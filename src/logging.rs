//! Logging configuration and initialization.
//!
//! Supports JSON and pretty-printed formats. Diagnostics always go to stderr
//! (or a configured file): stdout belongs to the response stream and must
//! never carry log output.

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logging (default for production).
    #[default]
    Json,
    /// Human-readable pretty printing (for development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format (JSON or Pretty).
    pub format: LogFormat,
    /// Log level filter (e.g., "info", "predict_host=debug").
    pub level: String,
    /// Optional file path for log output. If None, logs to stderr.
    pub output_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            output_path: None,
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("Failed to open log file: {0}")]
    FileOpen(String),
    #[error("Subscriber already initialized")]
    AlreadyInitialized,
}

/// Initialize the tracing subscriber with the given configuration.
///
/// This should be called once at application startup.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LogError::InvalidFilter(e.to_string()))?;

    match config.output_path {
        Some(ref path) => init_file_subscriber(filter, config.format, path),
        None => init_stderr_subscriber(filter, config.format),
    }
}

fn init_stderr_subscriber(filter: EnvFilter, format: LogFormat) -> Result<(), LogError> {
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?,
    }

    Ok(())
}

fn init_file_subscriber(
    filter: EnvFilter,
    format: LogFormat,
    path: &PathBuf,
) -> Result<(), LogError> {
    let file = std::fs::File::create(path).map_err(|e| LogError::FileOpen(e.to_string()))?;
    let writer = std::sync::Mutex::new(file);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(writer))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_json_to_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(config.output_path.is_none());
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let config = LogConfig {
            level: "not=a=filter".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(LogError::InvalidFilter(_))
        ));
    }
}
