//! Handler manifest parsing and validation.
//!
//! A handler unit on disk is a JSON manifest naming the registered entry
//! point that supplies its capabilities. The manifest's directory is the
//! model directory handed to `model_fn`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::loader::LoadError;

/// Handler unit descriptor from a handler.json file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerManifest {
    /// Name of the registered capability factory (e.g., "echo").
    pub entry: String,
    /// Human-readable handler name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Semantic version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HandlerManifest {
    /// Load a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| LoadError::InvalidManifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate manifest fields for correctness.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.entry.is_empty() {
            return Err(LoadError::InvalidManifest("entry cannot be empty".into()));
        }
        Ok(())
    }
}
