//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! TCP transport, config/preference storage and desktop notifications.

pub mod config;
pub mod notification;
pub mod preferences;
pub mod transport;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NotifyRustNotifier};
pub use preferences::MemoryPreferenceStore;
pub use transport::{TcpConnection, TcpConnector};
