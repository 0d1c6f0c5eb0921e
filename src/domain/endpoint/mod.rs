//! Forward destination

mod endpoint;

pub use endpoint::{parse_endpoint, Endpoint};
