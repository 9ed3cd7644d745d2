//! Tool descriptors: the immutable record of one invocable tool.

use std::sync::Arc;

use rmcp::model::{JsonObject, Meta, Tool, ToolAnnotations};
use serde_json::Value;

use crate::domains::widgets::WidgetTemplate;

use super::definitions::{ToolDefinition, ToolInput, ToolKind};
use super::error::ToolError;
use super::validation::{InputSchema, ValidationFailure};

/// `_meta` key advertising whether a tool's results can render a widget.
pub const META_PRODUCES_WIDGET: &str = "openai/resultCanProduceWidget";

/// `_meta` key naming the widget template a tool renders with.
pub const META_WIDGET_TEMPLATE: &str = "openai/widgetTemplate";

/// Immutable description of a registered tool.
///
/// Created once when the catalog is built. The `kind` binding to the tool's
/// handler is internal and never leaves the server through [`Self::to_tool`].
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    input_schema: InputSchema,
    read_only: bool,
    open_world: bool,
    widget: Option<WidgetTemplate>,
    kind: ToolKind,
}

impl ToolDescriptor {
    /// Build the descriptor for a tool definition, compiling its schema.
    pub fn of<T: ToolDefinition>(kind: ToolKind) -> Result<Self, ToolError> {
        Ok(Self {
            name: T::NAME,
            title: T::TITLE,
            description: T::DESCRIPTION,
            input_schema: InputSchema::compile(T::NAME, T::input_schema())?,
            read_only: T::READ_ONLY,
            open_world: T::OPEN_WORLD,
            widget: T::WIDGET,
            kind,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &JsonObject {
        self.input_schema.schema()
    }

    /// True if invoking the tool has no side effects.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// True if the tool may reach resources outside the server's closed set.
    pub fn open_world(&self) -> bool {
        self.open_world
    }

    /// The widget template this tool renders with, if any.
    pub fn widget(&self) -> Option<WidgetTemplate> {
        self.widget
    }

    /// Run the strict validator for this tool against raw arguments.
    pub fn validate(&self, arguments: &Value) -> Result<ToolInput, ValidationFailure> {
        self.kind.validate(&self.input_schema, arguments)
    }

    /// Annotation hints derived from `read_only` / `open_world`.
    pub fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations {
            title: Some(self.title.to_string()),
            read_only_hint: Some(self.read_only),
            destructive_hint: Some(!self.read_only),
            idempotent_hint: None,
            open_world_hint: Some(self.open_world),
        }
    }

    /// Public projection advertised to clients.
    pub fn to_tool(&self) -> Tool {
        let mut meta = JsonObject::new();
        meta.insert(
            META_PRODUCES_WIDGET.to_string(),
            Value::Bool(self.widget.is_some()),
        );
        if let Some(widget) = self.widget {
            meta.insert(
                META_WIDGET_TEMPLATE.to_string(),
                Value::String(widget.asset_name().to_string()),
            );
        }

        Tool {
            name: self.name.into(),
            title: Some(self.title.to_string()),
            description: Some(self.description.into()),
            input_schema: Arc::clone(self.input_schema.schema()),
            output_schema: None,
            annotations: Some(self.annotations()),
            icons: None,
            meta: Some(Meta(meta)),
        }
    }
}
