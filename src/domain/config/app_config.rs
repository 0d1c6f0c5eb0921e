//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::connection::Duration;
use crate::domain::endpoint::Endpoint;
use crate::domain::error::DurationParseError;
use crate::domain::history::DEFAULT_HISTORY_SIZE;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Last successfully connected destination (`host:port`)
    #[serde(rename = "hostPort")]
    pub host_port: Option<String>,
    pub connect_timeout: Option<String>,
    pub history_size: Option<usize>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            host_port: None,
            connect_timeout: None,
            history_size: Some(DEFAULT_HISTORY_SIZE),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            host_port: other.host_port.or(self.host_port),
            connect_timeout: other.connect_timeout.or(self.connect_timeout),
            history_size: other.history_size.or(self.history_size),
            notify: other.notify.or(self.notify),
        }
    }

    /// Get the saved destination, or None if not set/invalid
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.host_port.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get the parsed connect timeout; `None` waits as long as the OS does
    pub fn connect_timeout(&self) -> Result<Option<Duration>, DurationParseError> {
        self.connect_timeout.as_deref().map(str::parse).transpose()
    }

    /// Get history size, or the default if not set
    pub fn history_size_or_default(&self) -> usize {
        self.history_size.unwrap_or(DEFAULT_HISTORY_SIZE)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
