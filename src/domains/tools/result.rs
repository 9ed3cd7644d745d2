//! Call results - the envelope returned for every tool invocation.

use rmcp::model::{CallToolResult, Content, JsonObject, Meta};
use serde::Serialize;
use serde_json::Value;

/// One unit of a result body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Human-readable text.
    Text { text: String },

    /// Machine-readable structured data.
    Json { data: Value },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn json(data: Value) -> Self {
        Self::Json { data }
    }

    /// The text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Json { .. } => None,
        }
    }
}

/// Result of a single tool call.
///
/// Error results only ever carry a diagnostic text part: the constructors
/// make it impossible to attach structured content or render metadata to
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    content: Vec<ContentPart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    structured_content: Option<Value>,

    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    render_metadata: Option<JsonObject>,

    is_error: bool,
}

impl CallResult {
    /// A successful result.
    pub(crate) fn success(
        content: Vec<ContentPart>,
        structured_content: Option<Value>,
        render_metadata: Option<JsonObject>,
    ) -> Self {
        Self {
            content,
            structured_content,
            render_metadata,
            is_error: false,
        }
    }

    /// An error result with a single diagnostic text part.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::text(message)],
            structured_content: None,
            render_metadata: None,
            is_error: true,
        }
    }

    pub fn content(&self) -> &[ContentPart] {
        &self.content
    }

    pub fn structured_content(&self) -> Option<&Value> {
        self.structured_content.as_ref()
    }

    pub fn render_metadata(&self) -> Option<&JsonObject> {
        self.render_metadata.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Text of the first content part, if it is a text part.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ContentPart::as_text)
    }
}

/// Conversion for the rmcp transports, which have no JSON part kind: JSON
/// parts travel as text parts holding the serialized value.
impl From<CallResult> for CallToolResult {
    fn from(result: CallResult) -> Self {
        let content = result
            .content
            .into_iter()
            .map(|part| match part {
                ContentPart::Text { text } => Content::text(text),
                ContentPart::Json { data } => Content::text(data.to_string()),
            })
            .collect();

        CallToolResult {
            content,
            structured_content: result.structured_content,
            is_error: Some(result.is_error),
            meta: result.render_metadata.map(Meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_shape() {
        let result = CallResult::error("Unknown tool: nope");
        assert!(result.is_error());
        assert_eq!(result.first_text(), Some("Unknown tool: nope"));
        assert!(result.structured_content().is_none());
        assert!(result.render_metadata().is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "content": [{ "type": "text", "text": "Unknown tool: nope" }],
                "isError": true
            })
        );
    }

    #[test]
    fn test_success_serializes_meta() {
        let mut meta = JsonObject::new();
        meta.insert("openai".to_string(), json!({ "outputTemplate": {} }));
        let result = CallResult::success(
            vec![ContentPart::text("done"), ContentPart::json(json!({ "n": 1 }))],
            Some(json!({ "n": 1 })),
            Some(meta),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["content"][1], json!({ "type": "json", "data": { "n": 1 } }));
        assert_eq!(json["structuredContent"], json!({ "n": 1 }));
        assert_eq!(json["_meta"]["openai"], json!({ "outputTemplate": {} }));
        assert_eq!(json["isError"], json!(false));
    }

    #[test]
    fn test_into_rmcp_result() {
        let result = CallResult::success(
            vec![ContentPart::text("Result: 5"), ContentPart::json(json!({ "sum": 5 }))],
            Some(json!({ "sum": 5 })),
            None,
        );
        let rmcp_result: CallToolResult = result.into();
        assert_eq!(rmcp_result.is_error, Some(false));
        assert_eq!(rmcp_result.content.len(), 2);
        assert_eq!(rmcp_result.structured_content, Some(json!({ "sum": 5 })));

        let text = match &rmcp_result.content[1].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "{\"sum\":5}");
    }
}
