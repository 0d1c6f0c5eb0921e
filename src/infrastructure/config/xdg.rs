//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ConfigStore, PreferenceStore, HOST_PORT_KEY};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// XDG-compliant config store.
///
/// Also serves as the persistent preference store: the `hostPort`
/// preference is the `hostPort` entry of the config file.
#[derive(Debug, Clone)]
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Create a new XDG config store with default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("voice-forward");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse TOML content into AppConfig
    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize AppConfig to TOML
    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn unknown_preference(key: &str) -> ConfigError {
        ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown preference. Valid keys: {}", HOST_PORT_KEY),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}

#[async_trait]
impl PreferenceStore for XdgConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        if key != HOST_PORT_KEY {
            return Err(Self::unknown_preference(key));
        }
        Ok(self.load().await?.host_port)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        if key != HOST_PORT_KEY {
            return Err(Self::unknown_preference(key));
        }
        let mut config = self.load().await?;
        config.host_port = Some(value.to_string());
        self.save(&config).await
    }
}
