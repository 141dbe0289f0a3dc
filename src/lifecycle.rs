//! Handler lifecycle state machine.
//!
//! Owns the capability set and the loaded model. State moves exactly once at
//! startup, `Unloaded -> Ready` or `Unloaded -> Failed`, and never again:
//! per-request failures are contained in the pipeline and cannot touch it.

use std::path::PathBuf;

use crate::handler::{HandlerCapabilities, Model};
use crate::protocol::{HealthReport, InitReport};

/// Readiness of the hosted model.
#[derive(Debug)]
pub enum ModelState {
    Unloaded,
    Ready(Model),
    Failed(String),
}

/// Owns the handler capabilities and the model for the process lifetime.
pub struct HandlerLifecycle {
    capabilities: HandlerCapabilities,
    model_dir: PathBuf,
    state: ModelState,
}

impl HandlerLifecycle {
    pub fn new(capabilities: HandlerCapabilities, model_dir: PathBuf) -> Self {
        Self {
            capabilities,
            model_dir,
            state: ModelState::Unloaded,
        }
    }

    /// Run the one-time model load through the handler's `model_fn`.
    ///
    /// Called before any request is processed. The transition is terminal:
    /// a repeat call reports the current state without invoking `model_fn`
    /// again.
    pub fn initialize(&mut self) -> InitReport {
        match self.state {
            ModelState::Ready(_) => return InitReport::ready(),
            ModelState::Failed(ref message) => return InitReport::error(message.clone()),
            ModelState::Unloaded => {}
        }

        let result = match self.capabilities.model_fn() {
            None => Err("Handler must implement model_fn()".to_string()),
            Some(model_fn) => model_fn(&self.model_dir).map_err(|e| e.to_string()),
        };

        match result {
            Ok(model) => {
                self.state = ModelState::Ready(model);
                tracing::info!(model_dir = %self.model_dir.display(), "model loaded");
                InitReport::ready()
            }
            Err(message) => {
                self.state = ModelState::Failed(message.clone());
                tracing::error!(error = %message, "model initialization failed");
                InitReport::error(message)
            }
        }
    }

    /// Pure read of the current state; never mutates.
    pub fn health_check(&self) -> HealthReport {
        match &self.state {
            ModelState::Ready(_) => HealthReport::ready(),
            ModelState::Unloaded => HealthReport::not_ready(),
            ModelState::Failed(message) => HealthReport::error(message.clone()),
        }
    }

    /// The loaded model, if state is `Ready`.
    pub fn model(&self) -> Option<&Model> {
        match &self.state {
            ModelState::Ready(model) => Some(model),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn capabilities(&self) -> &HandlerCapabilities {
        &self.capabilities
    }

    pub fn model_dir(&self) -> &std::path::Path {
        &self.model_dir
    }
}
