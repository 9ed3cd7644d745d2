//! Analyze CSV tool definition.
//!
//! Reads a CSV file with a header row and computes per-column sums and
//! averages plus a row count.

use std::collections::BTreeMap;
use std::fs::File;

use csv::{ReaderBuilder, StringRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::core::security::resolve_path;
use crate::domains::tools::composer::ToolOutput;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::HandlerFault;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Aggregation to run over the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CsvOperation {
    Sum,
    Average,
    Count,
}

/// Parameters for the analyze CSV tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeCsvParams {
    /// Path to the CSV file
    pub filepath: String,

    /// Operations to run: sum, average and/or count
    pub operations: Vec<CsvOperation>,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output of the analyze CSV tool. Only requested keys are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<BTreeMap<String, f64>>,

    /// `None` per column when the column has no values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<BTreeMap<String, Option<f64>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Analyze CSV tool - aggregates numeric columns of a CSV file.
pub struct AnalyzeCsvTool;

impl ToolDefinition for AnalyzeCsvTool {
    const NAME: &'static str = "analyze_csv";
    const TITLE: &'static str = "Analyze CSV";
    const DESCRIPTION: &'static str =
        "Analyze a CSV file for operations such as sum, average, and count.";
    const READ_ONLY: bool = false;
    const OPEN_WORLD: bool = false;

    type Params = AnalyzeCsvParams;

    #[instrument(skip_all, fields(path = %params.filepath))]
    fn execute(params: AnalyzeCsvParams, ctx: &ToolContext) -> Result<ToolOutput, HandlerFault> {
        let path = resolve_path(&params.filepath, &ctx.config().security)?;
        let file = File::open(&path).map_err(|e| HandlerFault::io(&params.filepath, e))?;
        let table = Table::read(file, &params.filepath)?;

        let summary = table.summarize(&params.operations);
        info!(
            "Analyzed {} rows, {} numeric columns in {}",
            table.rows.len(),
            table.numeric_columns().len(),
            params.filepath
        );

        Ok(ToolOutput::new(
            summary_text(&summary),
            serde_json::to_value(&summary)?,
        ))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// A parsed CSV table.
struct Table {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Read a table with a header row.
    ///
    /// Rows shorter than the header are padded with empty cells. Rows with
    /// more fields than the header are rejected.
    fn read<R: std::io::Read>(reader: R, path: &str) -> Result<Self, HandlerFault> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| HandlerFault::csv(path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| HandlerFault::csv(path, e))?;
            if record.len() > headers.len() {
                return Err(HandlerFault::CsvShape {
                    path: path.to_string(),
                    line: record.position().map_or(0, |p| p.line()),
                    fields: record.len(),
                    columns: headers.len(),
                });
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    /// Columns whose non-empty cells all parse as numbers, with those values.
    fn numeric_columns(&self) -> Vec<(&str, Vec<f64>)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(i, header)| {
                let mut values = Vec::with_capacity(self.rows.len());
                for row in &self.rows {
                    let cell = row.get(i).unwrap_or("").trim();
                    if cell.is_empty() {
                        continue;
                    }
                    values.push(cell.parse::<f64>().ok()?);
                }
                Some((header.as_str(), values))
            })
            .collect()
    }

    fn summarize(&self, operations: &[CsvOperation]) -> CsvSummary {
        let columns = self.numeric_columns();
        let mut summary = CsvSummary::default();

        if operations.contains(&CsvOperation::Sum) {
            summary.sum = Some(
                columns
                    .iter()
                    .map(|(name, values)| (name.to_string(), values.iter().sum()))
                    .collect(),
            );
        }

        if operations.contains(&CsvOperation::Average) {
            summary.average = Some(
                columns
                    .iter()
                    .map(|(name, values)| {
                        let mean = (!values.is_empty())
                            .then(|| values.iter().sum::<f64>() / values.len() as f64);
                        (name.to_string(), mean)
                    })
                    .collect(),
            );
        }

        if operations.contains(&CsvOperation::Count) {
            summary.count = Some(self.rows.len());
        }

        summary
    }
}

/// Human-readable rendering of a summary.
fn summary_text(summary: &CsvSummary) -> String {
    let mut parts = Vec::new();

    if let Some(count) = summary.count {
        parts.push(format!("count: {}", count));
    }
    if let Some(sum) = &summary.sum {
        let columns: Vec<String> = sum.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        parts.push(format!("sum: {}", columns.join(", ")));
    }
    if let Some(average) = &summary.average {
        let columns: Vec<String> = average
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!("{}={}", k, v),
                None => format!("{}=n/a", k),
            })
            .collect();
        parts.push(format!("average: {}", columns.join(", ")));
    }

    if parts.is_empty() {
        "No operations requested".to_string()
    } else {
        parts.join("; ")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_context() -> ToolContext {
        ToolContext::new(Arc::new(Config::default()))
    }

    fn write_csv(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("prices.csv");
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_all_operations() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = write_csv(&temp_dir, "name,price,qty\nA,1.5,2\nB,2.5,\nC,2,4\n");

        let params = AnalyzeCsvParams {
            filepath,
            operations: vec![CsvOperation::Sum, CsvOperation::Average, CsvOperation::Count],
        };
        let output = AnalyzeCsvTool::execute(params, &test_context()).unwrap();
        let result = crate::domains::tools::composer::compose(output);
        let structured = result.structured_content().unwrap();

        assert_eq!(structured["count"], 3);
        assert_eq!(structured["sum"]["price"].as_f64(), Some(6.0));
        assert_eq!(structured["sum"]["qty"].as_f64(), Some(6.0));
        assert_eq!(structured["average"]["qty"].as_f64(), Some(3.0));
        assert!(structured["sum"].get("name").is_none());
        assert!(result.first_text().unwrap().starts_with("count: 3"));
    }

    #[test]
    fn test_only_requested_operations() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = write_csv(&temp_dir, "x\n1\n2\n");

        let params = AnalyzeCsvParams {
            filepath,
            operations: vec![CsvOperation::Count],
        };
        let output = AnalyzeCsvTool::execute(params, &test_context()).unwrap();
        let result = crate::domains::tools::composer::compose(output);
        assert_eq!(
            result.structured_content(),
            Some(&serde_json::json!({ "count": 2 }))
        );
    }

    #[test]
    fn test_empty_column_average_is_null() {
        let table = Table::read("a,b\n1,\n3,\n".as_bytes(), "inline.csv").unwrap();
        let summary = table.summarize(&[CsvOperation::Average]);
        let average = summary.average.unwrap();
        assert_eq!(average["a"], Some(2.0));
        assert_eq!(average["b"], None);
    }

    #[test]
    fn test_missing_file_is_fault() {
        let params = AnalyzeCsvParams {
            filepath: "/nonexistent/data/file.csv".to_string(),
            operations: vec![CsvOperation::Sum],
        };
        assert!(AnalyzeCsvTool::execute(params, &test_context()).is_err());
    }

    #[test]
    fn test_file_outside_root_is_rejected() {
        let root_dir = TempDir::new().unwrap();
        let other_dir = TempDir::new().unwrap();
        let filepath = write_csv(&other_dir, "x\n1\n");

        let mut config = Config::default();
        config.security.root_path = Some(root_dir.path().to_path_buf());
        let ctx = ToolContext::new(Arc::new(config));

        let params = AnalyzeCsvParams {
            filepath,
            operations: vec![CsvOperation::Sum],
        };
        let err = AnalyzeCsvTool::execute(params, &ctx).unwrap_err();
        assert!(matches!(err, HandlerFault::PathPolicy(_)));
        assert!(err.to_string().contains("outside the allowed root"));
    }

    #[test]
    fn test_short_rows_count_as_empty_cells() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = write_csv(&temp_dir, "a,b\n1,2\n3\n");

        let params = AnalyzeCsvParams {
            filepath,
            operations: vec![CsvOperation::Sum, CsvOperation::Average, CsvOperation::Count],
        };
        let output = AnalyzeCsvTool::execute(params, &test_context()).unwrap();
        let result = crate::domains::tools::composer::compose(output);
        let structured = result.structured_content().unwrap();

        assert_eq!(structured["count"], 2);
        assert_eq!(structured["sum"]["a"].as_f64(), Some(4.0));
        assert_eq!(structured["sum"]["b"].as_f64(), Some(2.0));
        assert_eq!(structured["average"]["b"].as_f64(), Some(2.0));
    }

    #[test]
    fn test_overlong_rows_are_fault() {
        let temp_dir = TempDir::new().unwrap();
        let filepath = write_csv(&temp_dir, "a,b\n1,2\n3,4,5\n");

        let params = AnalyzeCsvParams {
            filepath,
            operations: vec![CsvOperation::Count],
        };
        let err = AnalyzeCsvTool::execute(params, &test_context()).unwrap_err();
        assert!(matches!(
            err,
            HandlerFault::CsvShape { line: 3, fields: 3, columns: 2, .. }
        ));
    }

    #[test]
    fn test_summary_text_without_operations() {
        assert_eq!(summary_text(&CsvSummary::default()), "No operations requested");
    }
}
