//! Transports the server can be reached over.
//!
//! - `stdio` (default feature): one rmcp session on stdin/stdout.
//! - `tcp`: one rmcp session per line-delimited TCP connection.
//! - `http`: stateless JSON-RPC over POST, plus health and widget assets.
//!
//! Every transport stops on Ctrl+C or SIGTERM.

mod config;
mod error;
mod service;
mod shutdown;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
