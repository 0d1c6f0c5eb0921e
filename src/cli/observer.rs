//! Observer that hands forwarder events back to the CLI loop

use tokio::sync::mpsc;

use crate::application::ports::{ForwardError, ForwardObserver};
use crate::domain::connection::StateChange;

/// Event produced by the forwarder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardEvent {
    State(StateChange),
    Error(ForwardError),
    LineSent(String),
}

/// Forwards observer callbacks as messages on a channel, so the owning loop
/// renders them from its own task.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<ForwardEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ForwardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn publish(&self, event: ForwardEvent) {
        // Receiver gone means the loop is shutting down
        let _ = self.tx.send(event);
    }
}

impl ForwardObserver for ChannelObserver {
    fn state_changed(&self, change: StateChange) {
        self.publish(ForwardEvent::State(change));
    }

    fn error(&self, error: &ForwardError) {
        self.publish(ForwardEvent::Error(error.clone()));
    }

    fn line_sent(&self, line: &str) {
        self.publish(ForwardEvent::LineSent(line.to_string()));
    }
}
