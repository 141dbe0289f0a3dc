//! Host configuration loading from environment variables.
//!
//! All values are loaded from `PREDICT_HOST_*` environment variables with
//! sensible defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `PREDICT_HOST_MAX_REQUEST_BYTES` | 16777216 | Max request line size (bytes) |
//! | `PREDICT_HOST_LOG_FORMAT` | json | Log format (json, pretty) |
//! | `PREDICT_HOST_LOG_FILE` | (stderr) | Log file path |
//! | `RUST_LOG` | info | Log level filter |

use std::path::PathBuf;

use crate::logging::{LogConfig, LogFormat};

/// Request line size floor; the limit can never be configured below this.
const MIN_REQUEST_BYTES: usize = 1024;

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Requests longer than this (in bytes) are rejected with a structured
    /// error response instead of being parsed.
    pub max_request_bytes: usize,
    pub log: LogConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: 16 * 1024 * 1024,
            log: LogConfig::default(),
        }
    }
}

/// Parse a `usize` env var, returning `default` on missing or invalid.
fn parse_usize(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(val) => val.parse::<usize>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Load all host configuration from environment variables.
pub fn load() -> HostConfig {
    let defaults = HostConfig::default();
    let max_request_bytes =
        parse_usize("PREDICT_HOST_MAX_REQUEST_BYTES", defaults.max_request_bytes)
            .max(MIN_REQUEST_BYTES);

    let format = match std::env::var("PREDICT_HOST_LOG_FORMAT").as_deref() {
        Ok("pretty") => LogFormat::Pretty,
        _ => LogFormat::Json,
    };
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let output_path = std::env::var("PREDICT_HOST_LOG_FILE")
        .ok()
        .map(PathBuf::from);

    HostConfig {
        max_request_bytes,
        log: LogConfig {
            format,
            level,
            output_path,
        },
    }
}
