//! Widget templates and the hydration data they render.

use serde::Serialize;
use serde_json::Value;

/// A named widget template backed by an HTML asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTemplate {
    /// Carousel of news headlines with analysis buttons.
    StockCarousel,

    /// Carousel of analysis cards with a back button.
    AnalysisCarousel,
}

impl WidgetTemplate {
    /// File name of the template in the asset store.
    pub fn asset_name(self) -> &'static str {
        match self {
            Self::StockCarousel => "stock-carousel.html",
            Self::AnalysisCarousel => "analysis-carousel.html",
        }
    }
}

/// Hydration data for a carousel widget.
#[derive(Debug, Clone, Serialize)]
pub struct CarouselData {
    pub heading: String,
    pub cards: Vec<WidgetCard>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<WidgetAction>,
}

/// One card in a carousel.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetCard {
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub actions: Vec<WidgetAction>,
}

/// A follow-up tool call the widget can trigger.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetAction {
    pub label: String,

    /// Target tool name.
    pub tool: String,

    /// Pre-filled arguments for the target tool.
    pub args: Value,
}

impl WidgetAction {
    pub fn new(label: impl Into<String>, tool: impl Into<String>, args: Value) -> Self {
        Self {
            label: label.into(),
            tool: tool.into(),
            args,
        }
    }
}
