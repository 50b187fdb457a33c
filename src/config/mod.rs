//! Configuration loading and management

use crate::catalogue::CatalogueItem;
use crate::core::{ConfigError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// First identifier handed out to new entities
    pub sequence_start: i64,

    /// Run entity validation before every write
    pub validate_on_save: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sequence_start: 1,
            validate_on_save: true,
        }
    }
}

/// Complete configuration for a catalogue repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Items saved into the store when it is created
    #[serde(default)]
    pub seed: Vec<CatalogueItem>,
}

impl RepositoryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::IoError {
                message: format!("{}: {}", display, e),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(display),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RepositoryResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
