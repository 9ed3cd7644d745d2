//! Stock widget tools backed by canned sample data.

pub mod analysis;
pub mod news;

pub use analysis::{AnalysisMode, AnalyzeStockParams, AnalyzeStockTool};
pub use news::{Market, ShowStockNewsParams, ShowStockNewsTool};
