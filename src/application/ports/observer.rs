//! Observer port for connection events

use thiserror::Error;

use crate::domain::connection::StateChange;
use crate::domain::error::{ConnectError, SendError};

/// Failure reported to observers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Send(#[from] SendError),
}

/// Port for consumers of forwarder events (usually the UI layer).
///
/// Callbacks run while the forwarder holds its lock, in the order the
/// transitions happen. Implementations must be quick and must not call back
/// into the forwarder.
pub trait ForwardObserver: Send + Sync {
    /// The connection state changed
    fn state_changed(&self, change: StateChange);

    /// An operation failed
    fn error(&self, error: &ForwardError);

    /// A line was written to the destination
    fn line_sent(&self, _line: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ForwardObserver for NoopObserver {
    fn state_changed(&self, _change: StateChange) {}

    fn error(&self, _error: &ForwardError) {}
}
