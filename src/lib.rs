//! predict-host
//!
//! A long-running host that exposes a dynamically supplied prediction
//! routine over line-delimited JSON on stdin/stdout. A parent process loads
//! a handler, sends one request per line, and receives exactly one JSON
//! response line per request, structured errors included; a single bad
//! request never crashes the host.
//!
//! # Protocol
//!
//! - Input: UTF-8, one message per line. Blank lines are skipped.
//! - Output: one JSON document per line, flushed after each write.
//! - The exact line `{"ping": true}` is a health probe; anything else is a
//!   prediction request.
//! - Diagnostics go to stderr only; stdout is the response stream.
//!
//! # Handler contract
//!
//! A handler supplies up to four capabilities: `model_fn` (required at
//! initialization), `input_fn` (optional), `predict_fn` (required per
//! request), `output_fn` (optional). See [`handler::HandlerCapabilities`].

pub mod config;
pub mod handler;
pub mod lifecycle;
pub mod logging;
pub mod pipeline;
pub mod protocol;
pub mod serve;

use std::io::{BufRead, Write};

pub use config::HostConfig;
pub use handler::loader::{HandlerLoader, LoadError, LoadedHandler};
pub use handler::manifest::HandlerManifest;
pub use handler::registry::HandlerRegistry;
pub use handler::{CapabilityError, HandlerCapabilities, Model};
pub use lifecycle::{HandlerLifecycle, ModelState};
pub use protocol::{HealthReport, HealthStatus, InitReport, InitStatus, Response, PING_SENTINEL};
pub use serve::ServeError;

/// A loaded handler bound to its configuration, ready to serve.
pub struct Host {
    lifecycle: HandlerLifecycle,
    config: HostConfig,
}

impl Host {
    /// Create a host from a resolved handler unit.
    pub fn new(handler: LoadedHandler, config: HostConfig) -> Self {
        let lifecycle = HandlerLifecycle::new(handler.capabilities, handler.model_dir);
        Self { lifecycle, config }
    }

    /// Initialize the model and run the protocol loop until `input` closes.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<(), ServeError> {
        serve::serve(&mut self.lifecycle, &self.config, input, output)
    }

    pub fn lifecycle(&self) -> &HandlerLifecycle {
        &self.lifecycle
    }
}
