//! Endpoint value object

use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use crate::domain::error::ParseError;

/// Destination of the forward connection.
/// Immutable and validated on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: NonZeroU16,
}

impl Endpoint {
    /// Create an endpoint from an already split host and port
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ParseError> {
        let host = host.into();
        if host.is_empty() || host.contains(':') {
            return Err(ParseError::Malformed {
                input: format!("{}:{}", host, port),
            });
        }
        let port = NonZeroU16::new(port).ok_or_else(|| ParseError::BadPort {
            port: port.to_string(),
        })?;
        Ok(Self { host, port })
    }

    /// Get the host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port
    pub const fn port(&self) -> u16 {
        self.port.get()
    }
}

/// Parse a `host:port` string.
///
/// The input must split into exactly two tokens on `:`. The host token must be
/// non-empty and the port token must be a decimal integer in 1-65535.
pub fn parse_endpoint(raw: &str) -> Result<Endpoint, ParseError> {
    let input = raw.trim();
    let tokens: Vec<&str> = input.split(':').collect();

    let [host, port] = tokens.as_slice() else {
        return Err(ParseError::Malformed {
            input: input.to_string(),
        });
    };

    if host.is_empty() {
        return Err(ParseError::Malformed {
            input: input.to_string(),
        });
    }

    Ok(Endpoint {
        host: (*host).to_string(),
        port: parse_port(port)?,
    })
}

fn parse_port(token: &str) -> Result<NonZeroU16, ParseError> {
    let bad_port = || ParseError::BadPort {
        port: token.to_string(),
    };

    // u16::from_str also accepts a leading '+'
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_port());
    }

    token
        .parse::<u16>()
        .ok()
        .and_then(NonZeroU16::new)
        .ok_or_else(bad_port)
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_endpoint(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
