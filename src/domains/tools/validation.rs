//! Strict input validation against a tool's JSON schema.
//!
//! Arguments coming from a client are untrusted. They are first checked
//! against the descriptor's compiled schema (declared fields only, required
//! fields present, matching types, enumerated values) and only then
//! deserialized into the tool's typed parameters.

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use rmcp::model::JsonObject;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

const ROOT: &str = "$";

/// A tool's input schema together with its compiled validator.
#[derive(Clone)]
pub struct InputSchema {
    schema: Arc<JsonObject>,
    validator: Arc<Validator>,
}

impl InputSchema {
    /// Compile `schema` for the tool named `tool`.
    pub fn compile(tool: &str, schema: Arc<JsonObject>) -> Result<Self, ToolError> {
        let validator = jsonschema::validator_for(&Value::Object(schema.as_ref().clone()))
            .map_err(|e| ToolError::invalid_schema(tool, e.to_string()))?;
        Ok(Self {
            schema,
            validator: Arc::new(validator),
        })
    }

    pub fn schema(&self) -> &Arc<JsonObject> {
        &self.schema
    }
}

impl fmt::Debug for InputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSchema")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Location of the offending value, e.g. `$.operations[1]`.
    pub path: String,

    /// The schema keyword that was not met, e.g. `enum` or `required`.
    pub expected: String,

    /// What was found instead.
    pub actual: String,

    /// Human-readable description of the failure.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Rejection of an argument payload, carrying every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The itemized violations, in the order the validator reported them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Validate `arguments` against `schema` and deserialize them into `P`.
///
/// Pure and deterministic: the same schema and payload always produce the
/// same outcome.
pub fn validate_input<P: DeserializeOwned>(
    schema: &InputSchema,
    arguments: &Value,
) -> Result<P, ValidationFailure> {
    let violations: Vec<Violation> = schema
        .validator
        .iter_errors(arguments)
        .map(|error| Violation {
            path: json_path(&error.instance_path.to_string()),
            expected: keyword(&error.schema_path.to_string()),
            actual: describe(&error.instance),
            message: error.to_string(),
        })
        .collect();
    if !violations.is_empty() {
        return Err(ValidationFailure::new(violations));
    }

    // The schema is derived from `P`, so this only fails if the two drift apart.
    serde_json::from_value(arguments.clone()).map_err(|e| {
        ValidationFailure::new(vec![Violation {
            path: ROOT.to_string(),
            expected: "parameters".to_string(),
            actual: describe(arguments),
            message: e.to_string(),
        }])
    })
}

/// Convert a JSON pointer such as `/operations/1` to `$.operations[1]`.
fn json_path(pointer: &str) -> String {
    let mut path = ROOT.to_string();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            path.push_str(&format!("[{}]", segment));
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}

/// Last segment of a schema pointer, i.e. the keyword that failed.
fn keyword(schema_pointer: &str) -> String {
    schema_pointer
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("schema")
        .to_string()
}

/// Describe a value's kind for a violation report.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(40).collect();
            format!("string \"{}...\"", head)
        }
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Pair {
        a: f64,
        b: f64,
    }

    fn compile(value: Value) -> InputSchema {
        match value {
            Value::Object(map) => InputSchema::compile("test", Arc::new(map)).unwrap(),
            _ => panic!("schema must be an object"),
        }
    }

    fn pair_schema() -> InputSchema {
        compile(json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "b": { "type": "number" }
            },
            "required": ["a", "b"],
            "additionalProperties": false
        }))
    }

    #[test]
    fn test_accepts_valid_payload() {
        let pair: Pair = validate_input(&pair_schema(), &json!({ "a": 2.5, "b": 4 })).unwrap();
        assert_eq!(pair, Pair { a: 2.5, b: 4.0 });
    }

    #[test]
    fn test_rejects_extra_field() {
        let err = validate_input::<Pair>(&pair_schema(), &json!({ "a": 1, "b": 2, "c": 3 }))
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path, "$");
        assert_eq!(err.violations()[0].expected, "additionalProperties");
        assert!(err.to_string().contains("'c'"));
    }

    #[test]
    fn test_reports_every_violation() {
        let err = validate_input::<Pair>(&pair_schema(), &json!({ "a": "two" })).unwrap_err();
        assert_eq!(err.violations().len(), 2);

        let missing = err.violations().iter().find(|v| v.expected == "required").unwrap();
        assert_eq!(missing.path, "$");
        assert!(missing.message.contains("\"b\""));

        let mistyped = err.violations().iter().find(|v| v.expected == "type").unwrap();
        assert_eq!(mistyped.path, "$.a");
        assert_eq!(mistyped.actual, "string \"two\"");
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let err = validate_input::<Pair>(&pair_schema(), &json!([1, 2])).unwrap_err();
        assert_eq!(err.violations()[0].path, "$");
        assert_eq!(err.violations()[0].expected, "type");
        assert_eq!(err.violations()[0].actual, "array of 2 items");
    }

    #[test]
    fn test_enum_through_ref() {
        let root = compile(json!({
            "type": "object",
            "properties": {
                "ops": { "type": "array", "items": { "$ref": "#/$defs/Op" } }
            },
            "required": ["ops"],
            "additionalProperties": false,
            "$defs": { "Op": { "type": "string", "enum": ["sum", "count"] } }
        }));

        let ok = validate_input::<Value>(&root, &json!({ "ops": ["sum", "count"] }));
        assert!(ok.is_ok());

        let err = validate_input::<Value>(&root, &json!({ "ops": ["sum", "median"] })).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path, "$.ops[1]");
        assert_eq!(err.violations()[0].expected, "enum");
        assert_eq!(err.violations()[0].actual, "string \"median\"");
    }

    #[test]
    fn test_integer_and_optional() {
        let root = compile(json!({
            "type": "object",
            "properties": {
                "n": { "type": "integer" },
                "label": { "type": ["string", "null"] }
            }
        }));
        assert!(validate_input::<Value>(&root, &json!({ "n": 3, "label": null })).is_ok());
        assert!(validate_input::<Value>(&root, &json!({ "n": 3.5 })).is_err());
    }

    #[test]
    fn test_any_of_branches() {
        let root = compile(json!({
            "anyOf": [{ "type": "string" }, { "type": "null" }]
        }));
        assert!(validate_input::<Value>(&root, &json!(null)).is_ok());
        assert!(validate_input::<Value>(&root, &json!("x")).is_ok());
        assert!(validate_input::<Value>(&root, &json!(1)).is_err());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let payload = json!({ "z": 1, "a": true, "y": null });
        let first = validate_input::<Pair>(&pair_schema(), &payload).unwrap_err();
        let second = validate_input::<Pair>(&pair_schema(), &payload).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_schema_fails_to_compile() {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!(12));
        let err = InputSchema::compile("broken", Arc::new(schema)).unwrap_err();
        assert!(matches!(err, ToolError::InvalidSchema { ref tool, .. } if tool == "broken"));
    }

    #[test]
    fn test_json_path_conversion() {
        assert_eq!(json_path(""), "$");
        assert_eq!(json_path("/operations/1"), "$.operations[1]");
        assert_eq!(json_path("/a~1b"), "$.a/b");
        assert_eq!(keyword("/properties/ops/items/$ref/enum"), "enum");
    }
}
