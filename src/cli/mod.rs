//! CLI layer - Command-line interface
//!
//! Contains argument parsing, stdin command handling, output formatting,
//! signal handling, and the interactive forwarding loop.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod input;
pub mod logging;
pub mod observer;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_forward, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ForwardOptions};
pub use observer::{ChannelObserver, ForwardEvent};
pub use presenter::Presenter;
