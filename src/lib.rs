//! VoiceForward - forward text lines to a TCP destination
//!
//! This crate keeps at most one outbound TCP connection to a user-chosen
//! `host:port` and writes each submitted line to it, newline terminated.
//! The last destination that accepted a connection is remembered.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Endpoint parsing, connection state machine, sent-line history, config and errors
//! - **Application**: The line forwarder use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (TCP, config file, desktop notifications)
//! - **CLI**: Command-line interface, stdin commands, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
