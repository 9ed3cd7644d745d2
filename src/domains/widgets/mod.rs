//! Widgets domain module.
//!
//! Widget tools return render metadata that a client-side presentation layer
//! uses to draw an inline UI. This module holds the pieces that are not part
//! of dispatch itself:
//!
//! - `assets.rs` - read-only asset store serving the HTML/JS templates
//! - `template.rs` - named templates and their hydration data types

mod assets;
mod template;

pub use assets::{AssetError, AssetStore, content_type};
pub use template::{CarouselData, WidgetAction, WidgetCard, WidgetTemplate};
