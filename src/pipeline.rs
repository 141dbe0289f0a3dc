//! Per-request pipeline: parse, transform, predict, transform.
//!
//! Every failure is caught at the stage that raised it and converted into a
//! structured error response. Nothing here can crash the host or disturb the
//! lifecycle state; isolation is per request.

use serde_json::Value;
use thiserror::Error;

use crate::handler::CapabilityError;
use crate::lifecycle::HandlerLifecycle;
use crate::protocol::Response;

/// Failure within a single request. Display strings are the wire messages.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Model not initialized")]
    NotInitialized,

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("Handler must implement predict_fn()")]
    MissingPredict,

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Run one raw request line through the handler and produce its response.
pub fn handle(lifecycle: &HandlerLifecycle, raw: &str) -> Response {
    match run(lifecycle, raw) {
        Ok(output) => Response::output(output),
        Err(e) => {
            tracing::debug!(error = %e, "request failed");
            Response::error(e.to_string())
        }
    }
}

fn run(lifecycle: &HandlerLifecycle, raw: &str) -> Result<Value, RequestError> {
    let model = lifecycle.model().ok_or(RequestError::NotInitialized)?;
    let capabilities = lifecycle.capabilities();

    let original: Value = serde_json::from_str(raw)?;

    let transformed = match capabilities.input_fn() {
        Some(input_fn) => input_fn(original.clone())?,
        None => original.clone(),
    };

    let predict_fn = capabilities
        .predict_fn()
        .ok_or(RequestError::MissingPredict)?;
    let prediction = predict_fn(transformed, model)?;

    let output = match capabilities.output_fn() {
        Some(output_fn) => output_fn(prediction, &original)?,
        None => prediction,
    };

    Ok(output)
}
