//! Line forwarding use case

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::connection::{
    ConnectionSession, ConnectionState, InvalidStateTransition, StateChange,
};
use crate::domain::endpoint::Endpoint;
use crate::domain::error::{ConnectError, SendError};
use crate::domain::history::{SentHistory, DEFAULT_HISTORY_SIZE};

use super::ports::{
    Connector, ForwardError, ForwardObserver, LineWriter, PreferenceStore, HOST_PORT_KEY,
};

/// Configuration for the forwarder
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Number of sent lines to remember
    pub history_size: usize,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

/// Forwards text lines over at most one live outbound connection.
///
/// `connect`, `send` and `disconnect` are serialized by a single lock that is
/// held for the whole operation, network I/O included, so a send never sees a
/// connection that is half established or being replaced. Cloning is cheap and
/// every clone drives the same connection.
pub struct LineForwarder<C, P>
where
    C: Connector,
    P: PreferenceStore,
{
    shared: Arc<Shared<C, P>>,
}

struct Shared<C, P>
where
    C: Connector,
    P: PreferenceStore,
{
    connector: C,
    preferences: P,
    observer: Arc<dyn ForwardObserver>,
    inner: Mutex<Inner<C::Connection>>,
}

struct Inner<W> {
    session: ConnectionSession,
    connection: Option<W>,
    endpoint: Option<Endpoint>,
    history: SentHistory,
}

impl<C, P> Clone for LineForwarder<C, P>
where
    C: Connector,
    P: PreferenceStore,
{
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C, P> LineForwarder<C, P>
where
    C: Connector,
    P: PreferenceStore,
{
    /// Create a new forwarder in disconnected state
    pub fn new(
        connector: C,
        preferences: P,
        observer: Arc<dyn ForwardObserver>,
        config: ForwarderConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                connector,
                preferences,
                observer,
                inner: Mutex::new(Inner {
                    session: ConnectionSession::new(),
                    connection: None,
                    endpoint: None,
                    history: SentHistory::new(config.history_size),
                }),
            }),
        }
    }

    /// Get current connection state.
    ///
    /// This takes the same lock `connect` holds for the whole attempt, so a
    /// call made while connecting returns only once the attempt is over and
    /// never reports `Connecting`. In-flight transitions are visible only
    /// through the observer.
    pub async fn state(&self) -> ConnectionState {
        self.shared.inner.lock().await.session.state()
    }

    /// Get the endpoint of the live connection, if any. Waits like
    /// [`state`](Self::state) while a connect is in flight.
    pub async fn endpoint(&self) -> Option<Endpoint> {
        self.shared.inner.lock().await.endpoint.clone()
    }

    /// Lines written so far, newest first
    pub async fn history(&self) -> Vec<String> {
        self.shared.inner.lock().await.history.to_vec()
    }

    /// Connect to `endpoint`, replacing any live connection.
    ///
    /// The old connection is closed before the new attempt starts. On success
    /// the endpoint is saved under the `hostPort` preference. On failure the
    /// error is reported to the observer as well as returned; nothing is
    /// retried.
    pub async fn connect(&self, endpoint: Endpoint) -> Result<(), ConnectError> {
        let mut inner = self.shared.inner.lock().await;

        self.reset(&mut inner).await;
        self.transition(inner.session.begin_connect());
        debug!(%endpoint, "Connecting");

        match self.shared.connector.connect(&endpoint).await {
            Ok(connection) => {
                inner.connection = Some(connection);
                inner.endpoint = Some(endpoint.clone());
                self.transition(inner.session.connect_succeeded());
                info!(%endpoint, "Connected to destination");

                if let Err(e) = self
                    .shared
                    .preferences
                    .set(HOST_PORT_KEY, &endpoint.to_string())
                    .await
                {
                    warn!(error = %e, "Failed to save destination");
                }
                Ok(())
            }
            Err(e) => {
                warn!(%endpoint, error = %e, "Connection failed");
                self.shared.observer.error(&ForwardError::Connect(e.clone()));
                self.transition(inner.session.connect_failed());
                Err(e)
            }
        }
    }

    /// Run [`connect`](Self::connect) on a separate task so the caller is not
    /// blocked while the connection is established.
    pub fn spawn_connect(&self, endpoint: Endpoint) -> JoinHandle<Result<(), ConnectError>> {
        let forwarder = self.clone();
        tokio::spawn(async move { forwarder.connect(endpoint).await })
    }

    /// Forward a single line, terminated by `\n` on the wire.
    ///
    /// A failed write closes the connection and leaves the forwarder
    /// disconnected until the next explicit `connect`.
    pub async fn send(&self, line: &str) -> Result<(), SendError> {
        let mut inner = self.shared.inner.lock().await;

        let Some(connection) = inner.connection.as_mut() else {
            let err = SendError::NotConnected;
            self.shared.observer.error(&ForwardError::Send(err.clone()));
            return Err(err);
        };

        match connection.write_line(line).await {
            Ok(()) => {
                inner.history.record(line);
                info!(line = %line, "Sent line to destination");
                self.shared.observer.line_sent(line);
                Ok(())
            }
            Err(e) => {
                let err = SendError::IoFailure {
                    message: e.to_string(),
                };
                warn!(error = %e, "Send failed, closing connection");
                self.close_connection(&mut inner).await;
                self.shared.observer.error(&ForwardError::Send(err.clone()));
                Err(err)
            }
        }
    }

    /// Run [`send`](Self::send) on a separate task
    pub fn spawn_send(&self, line: impl Into<String>) -> JoinHandle<Result<(), SendError>> {
        let forwarder = self.clone();
        let line = line.into();
        tokio::spawn(async move { forwarder.send(&line).await })
    }

    /// Close the live connection, if any. Calling this while disconnected
    /// does nothing.
    pub async fn disconnect(&self) {
        let mut inner = self.shared.inner.lock().await;
        self.reset(&mut inner).await;
    }

    /// Bring the session back to disconnected from whatever state it is in.
    ///
    /// A session can be left connecting when a `connect` future is dropped
    /// mid-attempt.
    async fn reset(&self, inner: &mut MutexGuard<'_, Inner<C::Connection>>) {
        if inner.session.is_connecting() {
            inner.connection = None;
            inner.endpoint = None;
            self.transition(inner.session.connect_failed());
        } else {
            self.close_connection(inner).await;
        }
    }

    async fn close_connection(&self, inner: &mut MutexGuard<'_, Inner<C::Connection>>) {
        if let Some(mut connection) = inner.connection.take() {
            connection.close().await;
        }
        if let Some(endpoint) = inner.endpoint.take() {
            info!(%endpoint, "Disconnected from destination");
        }
        match inner.session.drop_connection() {
            Ok(Some(change)) => self.emit(change),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Unexpected connection state"),
        }
    }

    fn transition(&self, result: Result<StateChange, InvalidStateTransition>) {
        match result {
            Ok(change) => self.emit(change),
            Err(e) => warn!(error = %e, "Unexpected connection state"),
        }
    }

    fn emit(&self, change: StateChange) {
        debug!(%change, "Connection state changed");
        self.shared.observer.state_changed(change);
    }
}
