//! Connection session state machine

use std::fmt;
use thiserror::Error;

/// Connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transition between two different connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: ConnectionState,
    pub action: String,
}

/// Connection session entity.
/// Tracks the state of the single outbound connection.
///
/// State machine:
///   DISCONNECTED -> CONNECTING (begin_connect)
///   CONNECTING -> CONNECTED (connect_succeeded)
///   CONNECTING -> DISCONNECTED (connect_failed)
///   CONNECTED -> DISCONNECTED (drop_connection)
#[derive(Debug, Default)]
pub struct ConnectionSession {
    state: ConnectionState,
}

impl ConnectionSession {
    /// Create a new session in disconnected state
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Check if a connection attempt is in flight
    pub fn is_connecting(&self) -> bool {
        self.state == ConnectionState::Connecting
    }

    /// Transition from DISCONNECTED to CONNECTING
    pub fn begin_connect(&mut self) -> Result<StateChange, InvalidStateTransition> {
        self.transition(ConnectionState::Disconnected, ConnectionState::Connecting, "begin connect")
    }

    /// Transition from CONNECTING to CONNECTED
    pub fn connect_succeeded(&mut self) -> Result<StateChange, InvalidStateTransition> {
        self.transition(ConnectionState::Connecting, ConnectionState::Connected, "complete connect")
    }

    /// Transition from CONNECTING to DISCONNECTED
    pub fn connect_failed(&mut self) -> Result<StateChange, InvalidStateTransition> {
        self.transition(ConnectionState::Connecting, ConnectionState::Disconnected, "fail connect")
    }

    /// Transition from CONNECTED to DISCONNECTED.
    ///
    /// Returns `None` when already disconnected, so callers can treat
    /// disconnecting as idempotent.
    pub fn drop_connection(&mut self) -> Result<Option<StateChange>, InvalidStateTransition> {
        match self.state {
            ConnectionState::Disconnected => Ok(None),
            ConnectionState::Connected => {
                self.state = ConnectionState::Disconnected;
                Ok(Some(StateChange {
                    from: ConnectionState::Connected,
                    to: ConnectionState::Disconnected,
                }))
            }
            ConnectionState::Connecting => Err(InvalidStateTransition {
                current_state: self.state,
                action: "drop connection".to_string(),
            }),
        }
    }

    fn transition(
        &mut self,
        expected: ConnectionState,
        next: ConnectionState,
        action: &str,
    ) -> Result<StateChange, InvalidStateTransition> {
        if self.state != expected {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = next;
        Ok(StateChange {
            from: expected,
            to: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_disconnected() {
        let session = ConnectionSession::new();
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.is_connecting());
    }

    #[test]
    fn begin_connect_from_disconnected() {
        let mut session = ConnectionSession::new();
        let change = session.begin_connect().unwrap();
        assert_eq!(change.from, ConnectionState::Disconnected);
        assert_eq!(change.to, ConnectionState::Connecting);
        assert!(session.is_connecting());
    }

    #[test]
    fn begin_connect_while_connected_fails() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();
        session.connect_succeeded().unwrap();

        let err = session.begin_connect().unwrap_err();
        assert_eq!(err.current_state, ConnectionState::Connected);
        assert!(err.action.contains("begin connect"));
    }

    #[test]
    fn connect_succeeded_from_connecting() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();

        let change = session.connect_succeeded().unwrap();
        assert_eq!(change.to, ConnectionState::Connected);
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn connect_succeeded_from_disconnected_fails() {
        let mut session = ConnectionSession::new();

        let err = session.connect_succeeded().unwrap_err();
        assert_eq!(err.current_state, ConnectionState::Disconnected);
    }

    #[test]
    fn connect_failed_returns_to_disconnected() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();

        let change = session.connect_failed().unwrap();
        assert_eq!(change.from, ConnectionState::Connecting);
        assert_eq!(change.to, ConnectionState::Disconnected);
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn drop_connection_from_connected() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();
        session.connect_succeeded().unwrap();

        let change = session.drop_connection().unwrap();
        assert_eq!(
            change,
            Some(StateChange {
                from: ConnectionState::Connected,
                to: ConnectionState::Disconnected,
            })
        );
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn drop_connection_is_idempotent() {
        let mut session = ConnectionSession::new();
        assert_eq!(session.drop_connection().unwrap(), None);
        assert_eq!(session.drop_connection().unwrap(), None);
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn drop_connection_while_connecting_fails() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();

        let err = session.drop_connection().unwrap_err();
        assert_eq!(err.current_state, ConnectionState::Connecting);
    }

    #[test]
    fn reconnect_cycle() {
        let mut session = ConnectionSession::new();
        session.begin_connect().unwrap();
        session.connect_succeeded().unwrap();
        session.drop_connection().unwrap();

        // Can connect again
        session.begin_connect().unwrap();
        session.connect_succeeded().unwrap();
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn state_display() {
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }

    #[test]
    fn state_change_display() {
        let change = StateChange {
            from: ConnectionState::Connecting,
            to: ConnectionState::Connected,
        };
        assert_eq!(change.to_string(), "connecting -> connected");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: ConnectionState::Connecting,
            action: "drop connection".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("drop connection"));
        assert!(msg.contains("connecting"));
    }
}
