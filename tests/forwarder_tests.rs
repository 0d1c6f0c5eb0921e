//! Forwarder integration tests against a local TCP listener

use std::sync::{Arc, Mutex};

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use voice_forward::application::ports::{
    ForwardError, ForwardObserver, NoopObserver, PreferenceStore, HOST_PORT_KEY,
};
use voice_forward::application::{ForwarderConfig, LineForwarder};
use voice_forward::domain::connection::{ConnectionState, StateChange};
use voice_forward::domain::endpoint::Endpoint;
use voice_forward::domain::error::{ConnectError, SendError};
use voice_forward::infrastructure::{MemoryPreferenceStore, TcpConnector};

#[derive(Default)]
struct Recorder {
    changes: Mutex<Vec<StateChange>>,
    errors: Mutex<Vec<ForwardError>>,
}

impl ForwardObserver for Recorder {
    fn state_changed(&self, change: StateChange) {
        self.changes.lock().unwrap().push(change);
    }

    fn error(&self, error: &ForwardError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

fn forwarder(
    observer: Arc<dyn ForwardObserver>,
) -> (
    LineForwarder<TcpConnector, MemoryPreferenceStore>,
    MemoryPreferenceStore,
) {
    let preferences = MemoryPreferenceStore::new();
    let forwarder = LineForwarder::new(
        TcpConnector::new(),
        preferences.clone(),
        observer,
        ForwarderConfig::default(),
    );
    (forwarder, preferences)
}

async fn listener() -> (TcpListener, Endpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let endpoint = Endpoint::new("127.0.0.1", port).unwrap();
    (listener, endpoint)
}

#[tokio::test]
async fn delivers_newline_terminated_lines() {
    let (listener, endpoint) = listener().await;
    let (forwarder, preferences) = forwarder(Arc::new(NoopObserver));

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = String::new();
        socket.read_to_string(&mut received).await.unwrap();
        received
    });

    forwarder.connect(endpoint.clone()).await.unwrap();
    assert_eq!(forwarder.state().await, ConnectionState::Connected);
    assert_eq!(forwarder.endpoint().await, Some(endpoint.clone()));

    forwarder.send("hello").await.unwrap();
    forwarder.send("héllo wörld").await.unwrap();
    forwarder.disconnect().await;

    assert_eq!(server.await.unwrap(), "hello\nhéllo wörld\n");
    assert_eq!(
        preferences.get(HOST_PORT_KEY).await.unwrap(),
        Some(endpoint.to_string())
    );
    assert_eq!(forwarder.history().await, vec!["héllo wörld", "hello"]);
}

#[tokio::test]
async fn refused_connection_leaves_forwarder_usable() {
    let (listener, endpoint) = listener().await;
    drop(listener);

    let recorder = Arc::new(Recorder::default());
    let (forwarder, preferences) = forwarder(recorder.clone());

    let err = forwarder.connect(endpoint.clone()).await.unwrap_err();
    assert!(matches!(err, ConnectError::ConnectionRefused { .. }));
    assert_eq!(forwarder.state().await, ConnectionState::Disconnected);
    assert_eq!(preferences.get(HOST_PORT_KEY).await.unwrap(), None);

    assert_eq!(
        *recorder.changes.lock().unwrap(),
        vec![
            StateChange {
                from: ConnectionState::Disconnected,
                to: ConnectionState::Connecting,
            },
            StateChange {
                from: ConnectionState::Connecting,
                to: ConnectionState::Disconnected,
            },
        ]
    );
    assert_eq!(
        *recorder.errors.lock().unwrap(),
        vec![ForwardError::Connect(err)]
    );

    // A later attempt against a live listener still works
    let (listener, endpoint) = self::listener().await;
    let accept = tokio::spawn(async move { listener.accept().await.is_ok() });
    forwarder.connect(endpoint).await.unwrap();
    assert!(accept.await.unwrap());
}

#[tokio::test]
async fn reconnect_closes_previous_connection_first() {
    let (first, first_endpoint) = listener().await;
    let (second, second_endpoint) = listener().await;
    let (forwarder, preferences) = forwarder(Arc::new(NoopObserver));

    let first_server = tokio::spawn(async move {
        let (mut socket, _) = first.accept().await.unwrap();
        let mut received = String::new();
        socket.read_to_string(&mut received).await.unwrap();
        received
    });
    let second_server = tokio::spawn(async move {
        let (mut socket, _) = second.accept().await.unwrap();
        let mut received = String::new();
        socket.read_to_string(&mut received).await.unwrap();
        received
    });

    forwarder.connect(first_endpoint).await.unwrap();
    forwarder.send("one").await.unwrap();

    forwarder.connect(second_endpoint.clone()).await.unwrap();
    assert_eq!(first_server.await.unwrap(), "one\n");

    forwarder.send("two").await.unwrap();
    forwarder.disconnect().await;
    assert_eq!(second_server.await.unwrap(), "two\n");

    assert_eq!(
        preferences.get(HOST_PORT_KEY).await.unwrap(),
        Some(second_endpoint.to_string())
    );
}

#[tokio::test]
async fn send_while_disconnected_is_rejected() {
    let recorder = Arc::new(Recorder::default());
    let (forwarder, _) = forwarder(recorder.clone());

    assert_eq!(forwarder.send("lost").await, Err(SendError::NotConnected));
    assert!(forwarder.history().await.is_empty());
    assert!(recorder.changes.lock().unwrap().is_empty());
    assert_eq!(
        recorder.errors.lock().unwrap()[0].to_string(),
        "You must set a destination server."
    );
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let (listener, endpoint) = listener().await;
    let recorder = Arc::new(Recorder::default());
    let (forwarder, _) = forwarder(recorder.clone());

    let accept = tokio::spawn(async move { listener.accept().await.map(|(s, _)| s) });
    forwarder.connect(endpoint).await.unwrap();
    let _socket = accept.await.unwrap().unwrap();

    forwarder.disconnect().await;
    forwarder.disconnect().await;

    assert_eq!(forwarder.state().await, ConnectionState::Disconnected);
    assert_eq!(forwarder.endpoint().await, None);
    let changes = recorder.changes.lock().unwrap();
    assert_eq!(changes.len(), 3);
    assert_eq!(changes[2].to, ConnectionState::Disconnected);
}

#[tokio::test]
async fn spawned_operations_complete_off_the_caller() {
    let (listener, endpoint) = listener().await;
    let (forwarder, _) = forwarder(Arc::new(NoopObserver));

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = String::new();
        socket.read_to_string(&mut received).await.unwrap();
        received
    });

    forwarder.spawn_connect(endpoint).await.unwrap().unwrap();
    forwarder.spawn_send("async").await.unwrap().unwrap();
    forwarder.disconnect().await;

    assert_eq!(server.await.unwrap(), "async\n");
}
