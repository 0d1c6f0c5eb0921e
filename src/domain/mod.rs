//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod history;

// Re-export common types
pub use config::AppConfig;
pub use connection::{ConnectionSession, ConnectionState, Duration, StateChange};
pub use endpoint::{parse_endpoint, Endpoint};
pub use error::*;
pub use history::SentHistory;
