//! Transport adapters

mod tcp;

pub use tcp::{TcpConnection, TcpConnector};
