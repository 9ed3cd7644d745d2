//! Execution context shared by all tool handlers.

use std::sync::Arc;

use serde::Serialize;

use crate::core::config::Config;
use crate::domains::widgets::{AssetStore, WidgetTemplate};

use super::composer::WidgetRender;
use super::error::HandlerFault;

/// Read-only context handed to every handler invocation.
#[derive(Debug, Clone)]
pub struct ToolContext {
    config: Arc<Config>,
    assets: AssetStore,
}

impl ToolContext {
    pub fn new(config: Arc<Config>) -> Self {
        let assets = AssetStore::new(config.assets.dir.clone());
        Self { config, assets }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Load a widget template and pair it with its hydration data.
    pub fn render_widget<T: Serialize>(
        &self,
        template: WidgetTemplate,
        data: &T,
    ) -> Result<WidgetRender, HandlerFault> {
        let html = self.assets.load(template.asset_name())?;
        Ok(WidgetRender {
            html,
            data: serde_json::to_value(data)?,
        })
    }
}
