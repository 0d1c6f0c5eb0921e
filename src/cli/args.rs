//! CLI argument definitions using Clap

use clap::{ArgAction, Parser, Subcommand};

use crate::application::ports::HOST_PORT_KEY;
use crate::domain::connection::Duration;
use crate::domain::endpoint::Endpoint;

/// VoiceForward - forward text lines to a TCP destination
#[derive(Parser, Debug)]
#[command(name = "voice-forward")]
#[command(version)]
#[command(about = "Forward text lines from stdin over TCP to a host:port")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Destination (defaults to the last successful one)
    #[arg(value_name = "HOST:PORT")]
    pub destination: Option<String>,

    /// Give up connecting after this long (e.g., 5s, 1m); waits indefinitely if unset
    #[arg(short = 't', long, value_name = "TIME")]
    pub connect_timeout: Option<String>,

    /// Number of sent lines kept for /history
    #[arg(long, value_name = "N")]
    pub history_size: Option<usize>,

    /// Show desktop notifications for connection changes and errors
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Do not remember the destination after connecting
    #[arg(long)]
    pub no_save: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for the forwarding session
#[derive(Debug, Clone)]
pub struct ForwardOptions {
    pub destination: Option<Endpoint>,
    pub connect_timeout: Option<Duration>,
    pub history_size: usize,
    pub notify: bool,
    pub save_destination: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[HOST_PORT_KEY, "connect_timeout", "history_size", "notify"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
