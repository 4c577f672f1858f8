//! Plugin manifest: name, description, and compiled-in setting defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Manifest validation failed: {0}")]
    ValidationError(String),
}

/// Static declaration of the plugin, loadable from a YAML file so
/// deployments can override the defaults without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name, also the settings-panel section heading.
    pub name: String,

    /// Human-readable description shown in the host's plugin list.
    #[serde(default)]
    pub description: String,

    /// Default for the reset setting when neither the survey nor the global
    /// settings store carries a value.
    #[serde(default)]
    pub active_default: bool,
}

impl Default for PluginManifest {
    fn default() -> Self {
        Self {
            name: "Unsubmit".to_string(),
            description: "With token answer persistence: reset the submitted \
                          date when reloading a previously submitted response."
                .to_string(),
            active_default: false,
        }
    }
}

impl PluginManifest {
    /// Parse a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: PluginManifest = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a manifest from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
