//! TCP transport adapter

use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

use crate::application::ports::{Connector, LineWriter};
use crate::domain::connection::Duration;
use crate::domain::endpoint::Endpoint;
use crate::domain::error::ConnectError;

/// Opens plain TCP connections.
///
/// Without a timeout the attempt waits as long as the operating system does.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    /// Create a connector with no connect timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a connector that gives up after `timeout`
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            connect_timeout: timeout,
        }
    }

    async fn attempt(endpoint: &Endpoint) -> Result<TcpStream, ConnectError> {
        let addrs: Vec<SocketAddr> = lookup_host((endpoint.host(), endpoint.port()))
            .await
            .map_err(|e| {
                debug!(host = endpoint.host(), error = %e, "Host lookup failed");
                ConnectError::UnknownHost {
                    host: endpoint.host().to_string(),
                }
            })?
            .collect();

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%addr, error = %e, "Connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => Err(map_connect_error(endpoint, e)),
            None => Err(ConnectError::UnknownHost {
                host: endpoint.host().to_string(),
            }),
        }
    }
}

/// Map a socket error from a connect attempt to a typed error
fn map_connect_error(endpoint: &Endpoint, err: io::Error) -> ConnectError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ConnectError::ConnectionRefused {
            endpoint: endpoint.to_string(),
        },
        io::ErrorKind::TimedOut => ConnectError::Timeout {
            endpoint: endpoint.to_string(),
        },
        _ => ConnectError::IoFailure(err.to_string()),
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Connection = TcpConnection;

    async fn connect(&self, endpoint: &Endpoint) -> Result<TcpConnection, ConnectError> {
        let stream = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit.as_std(), Self::attempt(endpoint))
                .await
                .map_err(|_| ConnectError::Timeout {
                    endpoint: endpoint.to_string(),
                })??,
            None => Self::attempt(endpoint).await?,
        };

        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Failed to set TCP_NODELAY");
        }

        Ok(TcpConnection::new(stream))
    }
}

/// Buffered writer over a connected TCP stream
#[derive(Debug)]
pub struct TcpConnection {
    writer: BufWriter<TcpStream>,
}

impl TcpConnection {
    fn new(stream: TcpStream) -> Self {
        Self {
            writer: BufWriter::new(stream),
        }
    }
}

#[async_trait]
impl LineWriter for TcpConnection {
    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn close(&mut self) {
        if let Err(e) = self.writer.shutdown().await {
            debug!(error = %e, "Error while closing connection");
        }
    }
}
