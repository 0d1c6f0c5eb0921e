//! Preference store port interface

use async_trait::async_trait;

use crate::domain::error::ConfigError;

/// Key holding the last successfully connected `host:port`
pub const HOST_PORT_KEY: &str = "hostPort";

/// Port for a simple string key-value preference store
#[async_trait]
pub trait PreferenceStore: Send + Sync + 'static {
    /// Read a preference, `None` when it was never set
    async fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// Write a preference, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}
