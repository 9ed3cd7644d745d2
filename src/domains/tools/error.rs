//! Tool-specific error types.
//!
//! Every variant of [`ToolError`] is recoverable: the dispatcher turns it into
//! an error result instead of a protocol fault.

use thiserror::Error;

use crate::core::security::PathPolicyError;
use crate::domains::widgets::AssetError;

use super::validation::ValidationFailure;

/// Errors that can occur while resolving, validating or running a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments do not satisfy the tool's input schema.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// The tool handler failed while executing.
    #[error("Error: {0}")]
    Handler(#[from] HandlerFault),

    /// Two descriptors were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// A tool's input schema could not be compiled into a validator.
    #[error("Invalid input schema for {tool}: {reason}")]
    InvalidSchema { tool: String, reason: String },
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new schema compilation error.
    pub fn invalid_schema(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::Validation(_) => "validation",
            Self::Handler(_) => "handler_fault",
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::InvalidSchema { .. } => "invalid_schema",
        }
    }
}

/// Failures raised by a tool handler during execution.
#[derive(Debug, Error)]
pub enum HandlerFault {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be parsed.
    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A CSV row has more fields than the header declares.
    #[error("Malformed CSV in {path}: line {line} has {fields} fields, header has {columns}")]
    CsvShape {
        path: String,
        line: u64,
        fields: usize,
        columns: usize,
    },

    /// A widget asset could not be loaded.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A path was rejected by the configured path policy.
    #[error(transparent)]
    PathPolicy(#[from] PathPolicyError),

    /// A numeric result overflowed or is otherwise not representable in JSON.
    #[error("Result of {operation} is not a finite number")]
    NonFinite { operation: &'static str },

    /// Handler output could not be converted to JSON.
    #[error("Failed to serialize tool output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HandlerFault {
    /// Create a new I/O fault for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new CSV fault for the given path.
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
