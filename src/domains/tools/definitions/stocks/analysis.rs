//! Analyze stock tool definition.
//!
//! Returns a follow-on carousel of canned technical or fundamental analysis
//! for a symbol, with a button back to the news carousel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use super::{Market, ShowStockNewsTool};
use crate::domains::tools::composer::ToolOutput;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::ToolDefinition;
use crate::domains::tools::error::HandlerFault;
use crate::domains::widgets::{CarouselData, WidgetAction, WidgetCard, WidgetTemplate};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Kind of analysis to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Technical,
    Fundamental,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Fundamental => "fundamental",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Fundamental => "Fundamental",
        }
    }
}

/// Parameters for the analyze stock tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeStockParams {
    /// Ticker symbol (e.g., TCS, INFY, AAPL)
    pub symbol: String,

    /// Analysis type
    pub mode: AnalysisMode,
}

// ============================================================================
// Sample Data
// ============================================================================

/// One canned analysis card.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisCard {
    pub title: String,
    pub subtitle: &'static str,
    pub image: &'static str,
}

/// (aspect, subtitle, image) per mode.
const TECHNICAL: [(&str, &str, &str); 3] = [
    ("Trend", "Higher highs, EMA(50)>EMA(200)", "https://placehold.co/600x340?text=Trend"),
    ("Momentum", "RSI 62, MACD > 0, ADX 24", "https://placehold.co/600x340?text=Momentum"),
    ("Levels", "S/R: 1480 / 1545 / 1600", "https://placehold.co/600x340?text=Levels"),
];

const FUNDAMENTAL: [(&str, &str, &str); 3] = [
    ("Valuation", "PE 26x vs sector 24x; EV/EBITDA 13x", "https://placehold.co/600x340?text=Valuation"),
    ("Growth", "3Y CAGR: Rev 12%, EPS 15%", "https://placehold.co/600x340?text=Growth"),
    ("Quality", "ROCE 21%, FCF yield 3.1%", "https://placehold.co/600x340?text=Quality"),
];

/// Analysis cards for a symbol.
pub fn analysis_cards(symbol: &str, mode: AnalysisMode) -> Vec<AnalysisCard> {
    let rows = match mode {
        AnalysisMode::Technical => &TECHNICAL,
        AnalysisMode::Fundamental => &FUNDAMENTAL,
    };
    rows.iter()
        .map(|&(aspect, subtitle, image)| AnalysisCard {
            title: format!("{}: {}", symbol, aspect),
            subtitle,
            image,
        })
        .collect()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Analyze stock tool - canned analysis rendered as a carousel.
pub struct AnalyzeStockTool;

impl ToolDefinition for AnalyzeStockTool {
    const NAME: &'static str = "analyze_stock";
    const TITLE: &'static str = "Analyze Stock";
    const DESCRIPTION: &'static str =
        "Return a carousel with dummy technical or fundamental analysis for a symbol.";
    const READ_ONLY: bool = true;
    const OPEN_WORLD: bool = false;
    const WIDGET: Option<WidgetTemplate> = Some(WidgetTemplate::AnalysisCarousel);

    type Params = AnalyzeStockParams;

    #[instrument(skip_all, fields(symbol = %params.symbol, mode = params.mode.as_str()))]
    fn execute(params: AnalyzeStockParams, ctx: &ToolContext) -> Result<ToolOutput, HandlerFault> {
        let cards = analysis_cards(&params.symbol, params.mode);

        let widget_data = CarouselData {
            heading: format!("{} - {} view", params.symbol, params.mode.label()),
            cards: cards
                .iter()
                .map(|card| WidgetCard {
                    image: card.image.to_string(),
                    title: card.title.clone(),
                    subtitle: card.subtitle.to_string(),
                    actions: Vec::new(),
                })
                .collect(),
            back: Some(WidgetAction::new(
                "Back to news",
                ShowStockNewsTool::NAME,
                json!({ "market": Market::In }),
            )),
        };
        let widget = ctx.render_widget(WidgetTemplate::AnalysisCarousel, &widget_data)?;

        info!("Showing {} analysis for {}", params.mode.as_str(), params.symbol);

        Ok(ToolOutput::new(
            format!(
                "Showing {} analysis for {} (dummy).",
                params.mode.as_str(),
                params.symbol
            ),
            json!({ "symbol": params.symbol, "mode": params.mode, "cards": cards }),
        )
        .with_widget(widget))
    }
}

// ============================================================================
// Tests
// ============================================================================
