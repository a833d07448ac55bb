//! Configuration management for the CLI

use anyhow::{Context, Result};
use predictor_lib::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted CLI defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Cloud project hosting the model
    pub project: Option<String>,
    /// Deployed model name
    pub model: Option<String>,
    /// Deployed model version
    pub version: Option<String>,
    /// Service base URL
    pub api_base: Option<String>,
}

impl FileConfig {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to the default config file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("bwp").join("config.json"))
    }
}

/// Effective settings after merging flags, config file, and defaults
pub struct Settings {
    pub client: ClientConfig,
    pub token: Option<String>,
}

impl Settings {
    /// Flags win over the config file, which wins over built-in defaults
    pub fn resolve(cli: &crate::Cli) -> Result<Self> {
        let file = match FileConfig::load() {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unusable config file");
                FileConfig::default()
            }
        };
        let mut client = ClientConfig::default();

        if let Some(project) = cli.project.clone().or(file.project) {
            client.project = project;
        }
        if let Some(model) = cli.model.clone().or(file.model) {
            client.model = model;
        }
        if let Some(version) = cli.model_version.clone().or(file.version) {
            client.version = version;
        }
        if let Some(base) = cli.api_base.clone().or(file.api_base) {
            client.service_base = base;
        }

        Ok(Self {
            client,
            token: cli.token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = FileConfig {
            project: Some("my-project".to_string()),
            model: Some("babyweight".to_string()),
            version: None,
            api_base: Some("http://localhost:8080".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = FileConfig::load_from(&path).unwrap();
        assert_eq!(loaded.project.as_deref(), Some("my-project"));
        assert_eq!(loaded.model.as_deref(), Some("babyweight"));
        assert_eq!(loaded.version, None);
        assert_eq!(loaded.api_base.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_malformed_file_surfaces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FileConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.project.is_none());
    }
}
