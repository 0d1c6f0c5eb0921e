//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 5s, 1m, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when parsing a `host:port` endpoint string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid destination \"{input}\". Expected format: <host>:<port>")]
    Malformed { input: String },

    #[error("Invalid port \"{port}\". Expected a number between 1 and 65535")]
    BadPort { port: String },
}

/// Error when a connection attempt fails.
///
/// All variants are recoverable: the forwarder stays usable and may be
/// connected again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Unknown host: {host}")]
    UnknownHost { host: String },

    #[error("Connection refused by {endpoint}")]
    ConnectionRefused { endpoint: String },

    #[error("Timed out connecting to {endpoint}")]
    Timeout { endpoint: String },

    #[error("Could not connect: {0}")]
    IoFailure(String),
}

/// Error when forwarding a line fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("You must set a destination server.")]
    NotConnected,

    #[error("Could not send to destination: {message}")]
    IoFailure { message: String },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
