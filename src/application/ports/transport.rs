//! Transport port interfaces

use std::io;

use async_trait::async_trait;

use crate::domain::endpoint::Endpoint;
use crate::domain::error::ConnectError;

/// An open, writable line stream to the destination
#[async_trait]
pub trait LineWriter: Send {
    /// Write `line` followed by a single `\n` and flush.
    ///
    /// # Arguments
    /// * `line` - The text to forward, without terminator
    async fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Close the stream. Errors are ignored; the connection is gone either way.
    async fn close(&mut self);
}

/// Port for opening outbound connections
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Connection type produced by this connector
    type Connection: LineWriter + 'static;

    /// Open a connection to the endpoint.
    ///
    /// A single attempt is made; callers decide whether to try again.
    async fn connect(&self, endpoint: &Endpoint) -> Result<Self::Connection, ConnectError>;
}
