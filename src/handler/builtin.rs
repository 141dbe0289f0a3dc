//! Built-in handlers shipped with the host binary.

use super::{HandlerCapabilities, Model};

/// Echo handler: loads a unit model and returns each request unchanged.
///
/// Exists so the shipped binary serves end-to-end without an embedding
/// application; also the smallest possible reference for handler authors.
pub fn echo() -> HandlerCapabilities {
    HandlerCapabilities::new()
        .with_model_fn(|_dir| Ok(Model::new(())))
        .with_predict_fn(|input, _model| Ok(input))
}
