//! Connection state and connect timeout value objects

mod duration;
mod session;

pub use duration::Duration;
pub use session::{ConnectionSession, ConnectionState, InvalidStateTransition, StateChange};
