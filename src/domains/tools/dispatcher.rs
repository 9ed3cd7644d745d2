//! Dispatcher - resolves, validates and runs tool calls.
//!
//! `call_tool` is the single boundary where failures become results: unknown
//! names, validation failures and handler faults all come back as a
//! well-formed [`CallResult`] with `isError` set. Each call is attempted once.

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::core::config::Config;

use super::catalog::ToolCatalog;
use super::composer::compose;
use super::context::ToolContext;
use super::error::ToolError;
use super::result::CallResult;

/// Routes tool calls to their handlers.
///
/// Holds only read-only state, so one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: ToolCatalog,
    context: ToolContext,
}

impl Dispatcher {
    /// Create a dispatcher over the built-in catalog.
    pub fn new(config: Arc<Config>) -> Result<Self, ToolError> {
        Ok(Self::with_catalog(
            ToolCatalog::builtin()?,
            ToolContext::new(config),
        ))
    }

    /// Create a dispatcher over an explicit catalog.
    pub fn with_catalog(catalog: ToolCatalog, context: ToolContext) -> Self {
        info!("Dispatcher ready with {} tools", catalog.len());
        Self { catalog, context }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Public view of every registered tool, in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.catalog.iter().map(|d| d.to_tool()).collect()
    }

    /// Invoke a tool by name with untrusted arguments.
    #[instrument(skip(self, arguments))]
    pub fn call_tool(&self, name: &str, arguments: &Value) -> CallResult {
        match self.try_call(name, arguments) {
            Ok(result) => {
                info!("Tool call succeeded");
                result
            }
            Err(err) => {
                warn!(kind = err.kind(), "Tool call failed: {}", err);
                CallResult::error(err.to_string())
            }
        }
    }

    fn try_call(&self, name: &str, arguments: &Value) -> Result<CallResult, ToolError> {
        let descriptor = self.catalog.lookup(name)?;
        let input = descriptor.validate(arguments)?;
        let output = input.execute(&self.context)?;
        Ok(compose(output))
    }
}
