//! Show stock news tool definition.
//!
//! Returns two canned headlines for a market as a carousel widget whose
//! buttons invoke the analysis tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use super::AnalyzeStockTool;
use crate::domains::tools::composer::ToolOutput;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::ToolDefinition;
use crate::domains::tools::error::HandlerFault;
use crate::domains::widgets::{CarouselData, WidgetAction, WidgetCard, WidgetTemplate};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Market region for the headlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    #[default]
    In,
    Us,
}

impl Market {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Us => "US",
        }
    }
}

/// Parameters for the show stock news tool.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ShowStockNewsParams {
    /// Market region for dummy context
    #[serde(default)]
    pub market: Market,
}

// ============================================================================
// Sample Data
// ============================================================================

/// A canned news headline.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub symbol: &'static str,
    pub headline: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
}

const IN_NEWS: [NewsItem; 2] = [
    NewsItem {
        symbol: "TCS",
        headline: "TCS wins large banking transformation deal",
        summary: "Deal pipeline commentary turns positive QoQ.",
        image: "https://placehold.co/600x340?text=TCS",
    },
    NewsItem {
        symbol: "RELIANCE",
        headline: "Reliance Retail expands premium format footprint",
        summary: "O2C stable; retail + Jio drive growth.",
        image: "https://placehold.co/600x340?text=RELIANCE",
    },
];

const US_NEWS: [NewsItem; 2] = [
    NewsItem {
        symbol: "AAPL",
        headline: "Apple unveils AI features; services revenue climbs",
        summary: "Investors weigh margin impact vs ecosystem lock-in.",
        image: "https://placehold.co/600x340?text=AAPL",
    },
    NewsItem {
        symbol: "NVDA",
        headline: "NVIDIA announces next-gen accelerator roadmap",
        summary: "Hyperscalers guide continued capex strength.",
        image: "https://placehold.co/600x340?text=NVDA",
    },
];

/// Headlines for a market.
pub fn headlines(market: Market) -> &'static [NewsItem] {
    match market {
        Market::In => &IN_NEWS,
        Market::Us => &US_NEWS,
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Show stock news tool - two headlines rendered as a carousel.
pub struct ShowStockNewsTool;

impl ToolDefinition for ShowStockNewsTool {
    const NAME: &'static str = "show_stock_news";
    const TITLE: &'static str = "Show Stock News";
    const DESCRIPTION: &'static str =
        "Show two stock news items as a carousel with action buttons.";
    const READ_ONLY: bool = true;
    const OPEN_WORLD: bool = false;
    const WIDGET: Option<WidgetTemplate> = Some(WidgetTemplate::StockCarousel);

    type Params = ShowStockNewsParams;

    #[instrument(skip_all, fields(market = params.market.as_str()))]
    fn execute(params: ShowStockNewsParams, ctx: &ToolContext) -> Result<ToolOutput, HandlerFault> {
        let items = headlines(params.market);

        let widget_data = CarouselData {
            heading: "Today's Stock Highlights".to_string(),
            cards: items.iter().map(news_card).collect(),
            back: None,
        };
        let widget = ctx.render_widget(WidgetTemplate::StockCarousel, &widget_data)?;

        info!("Showing {} headlines for {}", items.len(), params.market.as_str());

        Ok(ToolOutput::new(
            "Here are two stock headlines. Pick an analysis to continue.",
            json!({ "market": params.market, "cards": items }),
        )
        .with_widget(widget))
    }
}

fn news_card(item: &NewsItem) -> WidgetCard {
    WidgetCard {
        image: item.image.to_string(),
        title: format!("{}: {}", item.symbol, item.headline),
        subtitle: item.summary.to_string(),
        actions: vec![
            WidgetAction::new(
                "Technical analysis",
                AnalyzeStockTool::NAME,
                json!({ "symbol": item.symbol, "mode": "technical" }),
            ),
            WidgetAction::new(
                "Fundamental analysis",
                AnalyzeStockTool::NAME,
                json!({ "symbol": item.symbol, "mode": "fundamental" }),
            ),
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================
