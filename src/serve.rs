//! The protocol loop: read one line, write one line.
//!
//! Lifetime of the loop is `Init -> Serving -> Terminated`. Initialization
//! failure aborts before the first read. While serving, the loop is strictly
//! one-in-one-out: responses are written in the order requests were read,
//! each flushed immediately so a pipe-based caller observes them promptly.
//! Stream I/O failures are fatal; request failures never are.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::config::HostConfig;
use crate::lifecycle::HandlerLifecycle;
use crate::pipeline;
use crate::protocol::{encode_message, InitReport, Response, PING_SENTINEL};

#[derive(Error, Debug)]
pub enum ServeError {
    /// The one-time model load did not reach `Ready`; the loop was never
    /// entered. Carries the report for the diagnostic stream.
    #[error("handler initialization failed")]
    Init(InitReport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Initialize the handler, then serve requests from `input` until it closes.
pub fn serve<R: BufRead, W: Write>(
    lifecycle: &mut HandlerLifecycle,
    config: &HostConfig,
    input: R,
    mut output: W,
) -> Result<(), ServeError> {
    let report = lifecycle.initialize();
    if !report.is_ready() {
        return Err(ServeError::Init(report));
    }
    tracing::info!("model ready, serving one JSON request per line");

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = if trimmed == PING_SENTINEL {
            encode_message(&lifecycle.health_check())?
        } else if trimmed.len() > config.max_request_bytes {
            tracing::warn!(
                bytes = trimmed.len(),
                limit = config.max_request_bytes,
                "request over size limit"
            );
            encode_message(&Response::error(format!(
                "request too large: {} bytes (max {})",
                trimmed.len(),
                config.max_request_bytes
            )))?
        } else {
            encode_message(&pipeline::handle(lifecycle, trimmed))?
        };

        writeln!(output, "{}", reply)?;
        output.flush()?;
    }

    tracing::info!("input stream closed, shutting down");
    Ok(())
}
