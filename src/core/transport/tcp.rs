//! TCP transport.
//!
//! Line-delimited JSON-RPC over raw sockets. Every connection is its own
//! rmcp session on its own task and all sessions share one dispatcher.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::shutdown::shutdown_signal;
use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` (e.g. out of file descriptors).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Accept sessions until a shutdown signal arrives.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;
        info!("Listening for MCP sessions on tcp://{}", addr);

        Self::accept_loop(listener, server, shutdown_signal()).await;
        Ok(())
    }

    /// Accept connections until `stop` resolves. Open sessions are left to
    /// finish on their own tasks.
    async fn accept_loop(
        listener: TcpListener,
        server: McpServer,
        stop: impl std::future::Future<Output = ()>,
    ) {
        tokio::pin!(stop);
        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("No longer accepting TCP connections");
                    return;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("TCP_NODELAY failed for {}: {}", peer, e);
                        }
                        tokio::spawn(Self::serve_session(server.clone(), stream, peer));
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }
    }

    async fn serve_session(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        let service = match server.serve(stream).await {
            Ok(service) => service,
            Err(e) => {
                warn!("Session handshake with {} failed: {}", peer, e);
                return;
            }
        };
        info!("Session opened for {}", peer);

        match service.waiting().await {
            Ok(reason) => info!("Session for {} closed: {:?}", peer, reason),
            Err(e) => warn!("Session for {} failed: {}", peer, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    #[tokio::test]
    async fn test_session_lists_tools_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = McpServer::new(Config::default()).unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let accept = tokio::spawn(TcpTransport::accept_loop(listener, server, async {
            let _ = stop_rx.await;
        }));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();

        let initialize = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#;
        write.write_all(initialize.as_bytes()).await.unwrap();
        write.write_all(b"\n").await.unwrap();
        let reply = lines.next_line().await.unwrap().unwrap();
        assert!(reply.contains("stock-tools-mcp"));

        write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .await
            .unwrap();
        write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
            .await
            .unwrap();
        let reply = lines.next_line().await.unwrap().unwrap();
        assert!(reply.contains("calculate_sum"));

        stop_tx.send(()).unwrap();
        accept.await.unwrap();
    }
}
