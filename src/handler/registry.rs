//! Registry of handler capability factories.
//!
//! Handlers are compiled into the host (or the embedding application) and
//! registered here by name; a handler manifest on disk selects one. This is
//! the seam through which externally authored prediction logic reaches the
//! host without runtime code loading.

use std::collections::HashMap;

use super::builtin;
use super::HandlerCapabilities;

/// Builds a fresh capability set for one handler entry point.
pub type HandlerFactory = Box<dyn Fn() -> HandlerCapabilities + Send>;

/// Name -> factory map for handler entry points.
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the built-in handlers registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("echo", builtin::echo);
        registry
    }

    /// Register a factory under `name`. A later registration under the same
    /// name replaces the earlier one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> HandlerCapabilities + Send + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Build the capability set for `name`, if registered.
    pub fn resolve(&self, name: &str) -> Option<HandlerCapabilities> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Check whether an entry point is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered entry point names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Model;

    #[test]
    fn resolve_unknown_entry_is_none() {
        let registry = HandlerRegistry::new();
        assert!(registry.resolve("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn resolve_returns_registered_capabilities() {
        let mut registry = HandlerRegistry::new();
        registry.register("unit", || {
            HandlerCapabilities::new().with_model_fn(|_dir| Ok(Model::new(())))
        });

        let caps = registry.resolve("unit").unwrap();
        assert!(caps.model_fn().is_some());
        assert!(caps.predict_fn().is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = HandlerRegistry::new();
        registry.register("h", HandlerCapabilities::new);
        registry.register("h", || {
            HandlerCapabilities::new().with_predict_fn(|input, _model| Ok(input))
        });

        let caps = registry.resolve("h").unwrap();
        assert!(caps.predict_fn().is_some());
    }

    #[test]
    fn builtins_include_echo() {
        let registry = HandlerRegistry::with_builtins();
        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["echo"]);
    }
}
