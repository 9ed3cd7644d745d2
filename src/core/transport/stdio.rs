//! STDIO transport.
//!
//! Stdout carries protocol frames only; all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::shutdown::shutdown_signal;
use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve one client over stdin/stdout until it closes stdin or the
    /// process is asked to stop.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;
        info!("Client connected over stdio");

        let cancel = service.cancellation_token();
        tokio::select! {
            quit = service.waiting() => {
                let reason = quit.map_err(|e| TransportError::service(e.to_string()))?;
                info!("Stdio session ended: {:?}", reason);
            }
            _ = shutdown_signal() => cancel.cancel(),
        }

        Ok(())
    }
}
