//! Tool definitions module.
//!
//! Each tool is defined in its own file and implements [`ToolDefinition`].
//! [`ToolKind`] is the closed list of registered tools; [`ToolInput`] carries
//! the validated, strongly typed parameters of one call. Both are matched
//! exhaustively, so every registered name has a validator and a handler.
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file (e.g., `my_tool.rs`) with params and a `ToolDefinition` impl
//! 2. Add a variant to `ToolKind` (and to `ToolKind::ALL`) and to `ToolInput`
//! 3. Fill in the three `match` arms below

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::composer::ToolOutput;
use super::context::ToolContext;
use super::descriptor::ToolDescriptor;
use super::error::{HandlerFault, ToolError};
use super::validation::{InputSchema, ValidationFailure, validate_input};
use crate::domains::widgets::WidgetTemplate;

pub mod analyze_csv;
pub mod calculate_sum;
pub mod stocks;

pub use analyze_csv::{AnalyzeCsvParams, AnalyzeCsvTool, CsvOperation};
pub use calculate_sum::{CalculateSumParams, CalculateSumTool};
pub use stocks::{
    AnalysisMode, AnalyzeStockParams, AnalyzeStockTool, Market, ShowStockNewsParams,
    ShowStockNewsTool,
};

/// A tool: its metadata, typed parameters and handler.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Display title.
    const TITLE: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// True if the tool has no side effects.
    const READ_ONLY: bool;

    /// True if the tool may reach resources outside the server's closed set.
    const OPEN_WORLD: bool;

    /// Widget template rendered with the tool's results.
    const WIDGET: Option<WidgetTemplate> = None;

    /// Validated input type. Its JSON schema is the tool's input contract.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Input schema derived from [`Self::Params`].
    fn input_schema() -> Arc<JsonObject> {
        cached_schema_for_type::<Self::Params>()
    }

    /// Run the tool. Faults are converted to error results by the dispatcher.
    fn execute(params: Self::Params, ctx: &ToolContext) -> Result<ToolOutput, HandlerFault>;
}

/// The registered tools, one variant each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CalculateSum,
    AnalyzeCsv,
    ShowStockNews,
    AnalyzeStock,
}

impl ToolKind {
    /// Every tool in presentation order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::CalculateSum,
        ToolKind::AnalyzeCsv,
        ToolKind::ShowStockNews,
        ToolKind::AnalyzeStock,
    ];

    pub fn descriptor(self) -> Result<ToolDescriptor, ToolError> {
        match self {
            Self::CalculateSum => ToolDescriptor::of::<CalculateSumTool>(self),
            Self::AnalyzeCsv => ToolDescriptor::of::<AnalyzeCsvTool>(self),
            Self::ShowStockNews => ToolDescriptor::of::<ShowStockNewsTool>(self),
            Self::AnalyzeStock => ToolDescriptor::of::<AnalyzeStockTool>(self),
        }
    }

    /// Validate raw arguments into this tool's typed input.
    pub fn validate(
        self,
        schema: &InputSchema,
        arguments: &Value,
    ) -> Result<ToolInput, ValidationFailure> {
        match self {
            Self::CalculateSum => validate_input(schema, arguments).map(ToolInput::CalculateSum),
            Self::AnalyzeCsv => validate_input(schema, arguments).map(ToolInput::AnalyzeCsv),
            Self::ShowStockNews => validate_input(schema, arguments).map(ToolInput::ShowStockNews),
            Self::AnalyzeStock => validate_input(schema, arguments).map(ToolInput::AnalyzeStock),
        }
    }
}

/// Validated input for one call, tagged by tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    CalculateSum(CalculateSumParams),
    AnalyzeCsv(AnalyzeCsvParams),
    ShowStockNews(ShowStockNewsParams),
    AnalyzeStock(AnalyzeStockParams),
}

impl ToolInput {
    /// Run the handler bound to this input's tool.
    pub fn execute(self, ctx: &ToolContext) -> Result<ToolOutput, HandlerFault> {
        match self {
            Self::CalculateSum(params) => CalculateSumTool::execute(params, ctx),
            Self::AnalyzeCsv(params) => AnalyzeCsvTool::execute(params, ctx),
            Self::ShowStockNews(params) => ShowStockNewsTool::execute(params, ctx),
            Self::AnalyzeStock(params) => AnalyzeStockTool::execute(params, ctx),
        }
    }
}
