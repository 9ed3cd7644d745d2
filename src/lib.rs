//! Stock tools MCP server library.
//!
//! An MCP server exposing a small catalog of schema-described tools. Every
//! call is validated against the tool's input schema before its handler
//! runs, and every outcome (including unknown tools, invalid arguments and
//! handler faults) comes back as a well-formed result envelope. Widget tools
//! attach HTML templates and hydration data for rich clients.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, path policy, the server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: catalog, validation, dispatch and result composition
//!   - **widgets**: widget templates, hydration data and the asset store
//!
//! # Example
//!
//! ```rust,no_run
//! use stock_tools_mcp_server::core::{Config, McpServer};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     let result = server
//!         .dispatch("calculate_sum".to_string(), json!({ "a": 2, "b": 3 }))
//!         .await;
//!     assert!(!result.is_error());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
