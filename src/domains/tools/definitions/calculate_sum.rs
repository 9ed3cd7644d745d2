//! Calculate sum tool definition.
//!
//! Adds two numbers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::ToolDefinition;
use crate::domains::tools::composer::ToolOutput;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::HandlerFault;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the calculate sum tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CalculateSumParams {
    /// First number
    pub a: f64,

    /// Second number
    pub b: f64,
}

/// Structured output of the calculate sum tool.
#[derive(Debug, Clone, Serialize)]
pub struct SumResult {
    pub a: f64,
    pub b: f64,
    pub sum: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculate sum tool - adds two numbers together.
pub struct CalculateSumTool;

impl ToolDefinition for CalculateSumTool {
    const NAME: &'static str = "calculate_sum";
    const TITLE: &'static str = "Calculate Sum";
    const DESCRIPTION: &'static str = "Add two numbers together.";
    const READ_ONLY: bool = true;
    const OPEN_WORLD: bool = false;

    type Params = CalculateSumParams;

    #[instrument(skip_all, fields(a = params.a, b = params.b))]
    fn execute(params: CalculateSumParams, _ctx: &ToolContext) -> Result<ToolOutput, HandlerFault> {
        let sum = params.a + params.b;
        if !sum.is_finite() {
            return Err(HandlerFault::NonFinite { operation: "sum" });
        }
        debug!("Computed sum {}", sum);

        let result = SumResult {
            a: params.a,
            b: params.b,
            sum,
        };

        Ok(ToolOutput::new(
            format!("Result: {}", sum),
            serde_json::to_value(result)?,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
