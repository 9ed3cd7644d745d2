//! Result composer - turns raw handler output into a call result.
//!
//! The text summary always comes first, followed by a JSON part carrying the
//! same information. Widget tools additionally get render metadata in the
//! `openai` namespace:
//!
//! ```json
//! { "openai": { "outputTemplate": { "html": "<...>", "data": { ... } } } }
//! ```

use rmcp::model::JsonObject;
use serde_json::{Value, json};

use super::result::{CallResult, ContentPart};

/// Namespace key under which render metadata is attached.
pub const TEMPLATE_NAMESPACE: &str = "openai";

/// A widget to render alongside the result.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRender {
    /// Static HTML document fragment for the widget.
    pub html: String,

    /// Hydration data the widget script reads.
    pub data: Value,
}

/// Raw output of a tool handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    summary: String,
    data: Value,
    widget: Option<WidgetRender>,
}

impl ToolOutput {
    pub fn new(summary: impl Into<String>, data: Value) -> Self {
        Self {
            summary: summary.into(),
            data,
            widget: None,
        }
    }

    pub fn with_widget(mut self, widget: WidgetRender) -> Self {
        self.widget = Some(widget);
        self
    }
}

/// Build the `outputTemplate` render metadata for a widget.
pub fn output_template(widget: WidgetRender) -> JsonObject {
    let mut meta = JsonObject::new();
    meta.insert(
        TEMPLATE_NAMESPACE.to_string(),
        json!({
            "outputTemplate": {
                "html": widget.html,
                "data": widget.data,
            }
        }),
    );
    meta
}

/// Compose a successful call result from handler output.
pub fn compose(output: ToolOutput) -> CallResult {
    let ToolOutput {
        summary,
        data,
        widget,
    } = output;

    CallResult::success(
        vec![ContentPart::text(summary), ContentPart::json(data.clone())],
        Some(data),
        widget.map(output_template),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_plain_output() {
        let result = compose(ToolOutput::new("Result: 5", json!({ "a": 2, "b": 3, "sum": 5 })));
        assert!(!result.is_error());
        assert_eq!(result.first_text(), Some("Result: 5"));
        assert_eq!(
            result.content()[1],
            ContentPart::json(json!({ "a": 2, "b": 3, "sum": 5 }))
        );
        assert_eq!(result.structured_content(), Some(&json!({ "a": 2, "b": 3, "sum": 5 })));
        assert!(result.render_metadata().is_none());
    }

    #[test]
    fn test_compose_widget_output() {
        let output = ToolOutput::new("Two cards", json!({ "cards": [] })).with_widget(WidgetRender {
            html: "<div id=\"root\"></div>".to_string(),
            data: json!({ "heading": "Highlights", "cards": [] }),
        });

        let result = compose(output);
        let meta = result.render_metadata().unwrap();
        let template = &meta[TEMPLATE_NAMESPACE]["outputTemplate"];
        assert_eq!(template["html"], "<div id=\"root\"></div>");
        assert_eq!(template["data"]["heading"], "Highlights");
    }
}
