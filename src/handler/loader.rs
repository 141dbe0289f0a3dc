//! Handler unit loading and validation.
//!
//! Resolves a filesystem path to a capability set plus the model directory.
//! Every failure here is fatal: the host refuses to start without a usable
//! handler.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::manifest::HandlerManifest;
use super::registry::HandlerRegistry;
use super::HandlerCapabilities;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Handler file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid handler manifest: {0}")]
    InvalidManifest(String),

    #[error("Unknown handler entry point: {0}")]
    UnknownEntry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved handler unit: its capabilities and the directory handed to
/// `model_fn` at initialization.
#[derive(Debug)]
pub struct LoadedHandler {
    pub capabilities: HandlerCapabilities,
    pub model_dir: PathBuf,
}

/// Resolves handler units against a registry of entry points.
pub struct HandlerLoader {
    registry: HandlerRegistry,
}

impl HandlerLoader {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Load the handler unit at `path`.
    ///
    /// The path must exist, parse as a handler manifest, and name a
    /// registered entry point. The model directory is the manifest's parent
    /// directory (`.` when the path has none).
    pub fn load(&self, path: &Path) -> Result<LoadedHandler, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let manifest = HandlerManifest::from_file(path)?;
        let capabilities = self
            .registry
            .resolve(&manifest.entry)
            .ok_or_else(|| LoadError::UnknownEntry(manifest.entry.clone()))?;

        tracing::info!(
            entry = %manifest.entry,
            path = %path.display(),
            "handler unit resolved"
        );

        Ok(LoadedHandler {
            capabilities,
            model_dir: model_dir_of(path),
        })
    }
}

/// Directory containing the handler unit; the original input to `model_fn`.
fn model_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Model;
    use std::io::Write;

    fn registry_with_unit() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry.register("unit", || {
            HandlerCapabilities::new().with_model_fn(|_dir| Ok(Model::new(())))
        });
        registry
    }

    fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("handler.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_path_is_not_found() {
        let loader = HandlerLoader::new(registry_with_unit());
        let result = loader.load(Path::new("/nonexistent/handler.json"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn malformed_manifest_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), "{ not json");

        let loader = HandlerLoader::new(registry_with_unit());
        let result = loader.load(&path);
        assert!(matches!(result, Err(LoadError::InvalidManifest(_))));
    }

    #[test]
    fn unregistered_entry_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"entry": "nope"}"#);

        let loader = HandlerLoader::new(registry_with_unit());
        match loader.load(&path) {
            Err(LoadError::UnknownEntry(name)) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownEntry, got {:?}", other),
        }
    }

    #[test]
    fn resolves_capabilities_and_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"entry": "unit"}"#);

        let loader = HandlerLoader::new(registry_with_unit());
        let handler = loader.load(&path).unwrap();
        assert!(handler.capabilities.model_fn().is_some());
        assert_eq!(handler.model_dir, dir.path());
    }

    #[test]
    fn bare_filename_maps_model_dir_to_current() {
        assert_eq!(model_dir_of(Path::new("handler.json")), PathBuf::from("."));
        assert_eq!(
            model_dir_of(Path::new("units/handler.json")),
            PathBuf::from("units")
        );
    }
}
