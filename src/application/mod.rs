//! Application layer - Use cases and port interfaces
//!
//! Contains the line forwarding use case and trait definitions
//! for external system interactions.

pub mod forwarder;
pub mod ports;

// Re-export use cases
pub use forwarder::{ForwarderConfig, LineForwarder};
