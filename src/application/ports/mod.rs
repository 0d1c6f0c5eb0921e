//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod observer;
pub mod preferences;
pub mod transport;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use observer::{ForwardError, ForwardObserver, NoopObserver};
pub use preferences::{PreferenceStore, HOST_PORT_KEY};
pub use transport::{Connector, LineWriter};
