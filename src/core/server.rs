//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the tool [`Dispatcher`] and exposes it to every
//! transport: rmcp's [`ServerHandler`] for STDIO and TCP, and plain methods
//! for the HTTP endpoint.
//!
//! Tool handlers are synchronous. Calls are moved onto tokio's blocking pool
//! so a slow CSV read never stalls the protocol loop, and a panicking
//! handler surfaces as an error result instead of tearing down the session.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{CallResult, Dispatcher};
use crate::domains::widgets::AssetStore;

const INSTRUCTIONS: &str = "Tools: calculate_sum adds two numbers, analyze_csv summarizes \
numeric CSV columns, show_stock_news and analyze_stock render stock widgets.";

/// The main MCP server handler.
#[derive(Debug, Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Resolves, validates and runs tool calls.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails only if the built-in tool catalog is inconsistent.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&config))?);

        Ok(Self { config, dispatcher })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The asset store widget HTML and scripts are served from.
    pub fn assets(&self) -> &AssetStore {
        self.dispatcher.context().assets()
    }

    /// Public view of every registered tool.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.dispatcher.list_tools()
    }

    /// Run one tool call on the blocking pool.
    pub async fn dispatch(&self, name: String, arguments: Value) -> CallResult {
        let dispatcher = Arc::clone(&self.dispatcher);
        let task = tokio::task::spawn_blocking(move || dispatcher.call_tool(&name, &arguments));

        match task.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool task did not complete: {}", e);
                CallResult::error(format!("Error: tool execution aborted: {}", e))
            }
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.name().to_string();
        info.server_info.version = self.version().to_string();
        info
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: McpServer::list_tools(self),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        let result = self.dispatch(request.name.to_string(), arguments).await;
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_identity() {
        let server = server();
        assert_eq!(server.name(), "stock-tools-mcp");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));

        let info = server.get_info();
        assert_eq!(info.server_info.name, "stock-tools-mcp");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_list_tools_in_registration_order() {
        let names: Vec<String> = server()
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["calculate_sum", "analyze_csv", "show_stock_news", "analyze_stock"]
        );
    }

    #[test]
    fn test_dispatch_runs_on_blocking_pool() {
        let server = server();
        let result = tokio_test::block_on(server.dispatch(
            "calculate_sum".to_string(),
            json!({ "a": 40, "b": 2 }),
        ));
        assert!(!result.is_error());
        assert_eq!(result.first_text(), Some("Result: 42"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let result = server()
            .dispatch("missing".to_string(), json!({}))
            .await;
        assert!(result.is_error());
        assert_eq!(result.first_text(), Some("Unknown tool: missing"));
    }

    #[tokio::test]
    async fn test_widget_call_carries_template() {
        let result = server()
            .dispatch("show_stock_news".to_string(), json!({ "market": "US" }))
            .await;
        assert!(!result.is_error());

        let rmcp_result: CallToolResult = result.into();
        let meta = rmcp_result.meta.unwrap();
        let html = meta.0["openai"]["outputTemplate"]["html"].as_str().unwrap();
        assert!(html.contains("stock-carousel-root"));
    }

    #[test]
    fn test_assets_come_from_config() {
        let server = server();
        assert_eq!(server.assets().dir(), server.config().assets.dir.as_path());
    }
}
