//! Handler capability contract.
//!
//! A handler supplies up to four named capabilities: `model_fn` (loads the
//! model, required at initialization), `input_fn` (optional request
//! transform), `predict_fn` (inference, required per request), and
//! `output_fn` (optional response transform). Absence of a capability is an
//! explicit `None`, never probed by reflection.

pub mod builtin;
pub mod loader;
pub mod manifest;
pub mod registry;

use std::any::Any;
use std::fmt;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Failure raised inside user-supplied capability code.
///
/// Carries only a message; the host reports it verbatim in the structured
/// error response for the request (or init report) that triggered it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(String);

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for CapabilityError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for CapabilityError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Opaque handle to a loaded model.
///
/// Produced once by `model_fn`, owned by the lifecycle for the process
/// lifetime, and passed by reference to `predict_fn` on every request.
/// Handlers downcast to their concrete type.
pub struct Model(Box<dyn Any + Send>);

impl Model {
    pub fn new<T: Any + Send>(inner: T) -> Self {
        Self(Box::new(inner))
    }

    /// Borrow the concrete model, if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model").finish_non_exhaustive()
    }
}

/// Loads a model given the handler unit's directory. Invoked exactly once.
pub type ModelFn = Box<dyn Fn(&Path) -> Result<Model, CapabilityError> + Send>;

/// Transforms the parsed request before prediction.
pub type InputFn = Box<dyn Fn(Value) -> Result<Value, CapabilityError> + Send>;

/// Performs inference on the (transformed) request and the loaded model.
pub type PredictFn = Box<dyn Fn(Value, &Model) -> Result<Value, CapabilityError> + Send>;

/// Transforms the prediction, with access to the original parsed request.
pub type OutputFn = Box<dyn Fn(Value, &Value) -> Result<Value, CapabilityError> + Send>;

/// The fixed-shape capability record the host consumes.
///
/// Each slot is an optional callable; the host never introspects beyond
/// presence. Missing `model_fn` is detected at initialization, missing
/// `predict_fn` at the first request.
#[derive(Default)]
pub struct HandlerCapabilities {
    model_fn: Option<ModelFn>,
    input_fn: Option<InputFn>,
    predict_fn: Option<PredictFn>,
    output_fn: Option<OutputFn>,
}

impl HandlerCapabilities {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_fn(
        mut self,
        f: impl Fn(&Path) -> Result<Model, CapabilityError> + Send + 'static,
    ) -> Self {
        self.model_fn = Some(Box::new(f));
        self
    }

    pub fn with_input_fn(
        mut self,
        f: impl Fn(Value) -> Result<Value, CapabilityError> + Send + 'static,
    ) -> Self {
        self.input_fn = Some(Box::new(f));
        self
    }

    pub fn with_predict_fn(
        mut self,
        f: impl Fn(Value, &Model) -> Result<Value, CapabilityError> + Send + 'static,
    ) -> Self {
        self.predict_fn = Some(Box::new(f));
        self
    }

    pub fn with_output_fn(
        mut self,
        f: impl Fn(Value, &Value) -> Result<Value, CapabilityError> + Send + 'static,
    ) -> Self {
        self.output_fn = Some(Box::new(f));
        self
    }

    pub fn model_fn(&self) -> Option<&ModelFn> {
        self.model_fn.as_ref()
    }

    pub fn input_fn(&self) -> Option<&InputFn> {
        self.input_fn.as_ref()
    }

    pub fn predict_fn(&self) -> Option<&PredictFn> {
        self.predict_fn.as_ref()
    }

    pub fn output_fn(&self) -> Option<&OutputFn> {
        self.output_fn.as_ref()
    }
}

impl fmt::Debug for HandlerCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerCapabilities")
            .field("model_fn", &self.model_fn.is_some())
            .field("input_fn", &self.input_fn.is_some())
            .field("predict_fn", &self.predict_fn.is_some())
            .field("output_fn", &self.output_fn.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_capability_set_has_no_slots() {
        let caps = HandlerCapabilities::new();
        assert!(caps.model_fn().is_none());
        assert!(caps.input_fn().is_none());
        assert!(caps.predict_fn().is_none());
        assert!(caps.output_fn().is_none());
    }

    #[test]
    fn builder_populates_slots() {
        let caps = HandlerCapabilities::new()
            .with_model_fn(|_dir| Ok(Model::new(42u32)))
            .with_predict_fn(|input, _model| Ok(input));
        assert!(caps.model_fn().is_some());
        assert!(caps.predict_fn().is_some());
        assert!(caps.input_fn().is_none());
    }

    #[test]
    fn model_downcasts_to_concrete_type() {
        let model = Model::new(String::from("M"));
        assert_eq!(model.downcast_ref::<String>().map(String::as_str), Some("M"));
        assert!(model.downcast_ref::<u64>().is_none());
    }

    #[test]
    fn capability_error_displays_message_verbatim() {
        let err = CapabilityError::new("weights file corrupt");
        assert_eq!(err.to_string(), "weights file corrupt");
    }

    #[test]
    fn capabilities_compose_through_call_sites() {
        let caps = HandlerCapabilities::new()
            .with_input_fn(|v| Ok(json!({ "wrapped": v })))
            .with_predict_fn(|input, _model| Ok(input));
        let model = Model::new(());
        let input = caps.input_fn().unwrap()(json!(1)).unwrap();
        let out = caps.predict_fn().unwrap()(input, &model).unwrap();
        assert_eq!(out, json!({ "wrapped": 1 }));
    }
}
