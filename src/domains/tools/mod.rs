//! Tools domain module.
//!
//! This module handles everything between "a client asked to call a tool"
//! and "a result envelope goes back".
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `descriptor.rs` - Immutable tool metadata and its public projection
//! - `catalog.rs` - Ordered, read-only registry of descriptors
//! - `validation.rs` - Strict schema validation of untrusted arguments
//! - `dispatcher.rs` - Lookup, validation, invocation and error shaping
//! - `composer.rs` - Builds result bodies and widget render metadata
//! - `result.rs` - The call result envelope
//! - `error.rs` - Tool-specific error types
//!
//! Control flow: `Dispatcher::call_tool` → `ToolCatalog::lookup` →
//! `ToolDescriptor::validate` → `ToolInput::execute` → `compose`.

mod catalog;
mod composer;
mod context;
pub mod definitions;
mod descriptor;
mod dispatcher;
mod error;
mod result;
mod validation;

pub use catalog::ToolCatalog;
pub use composer::{TEMPLATE_NAMESPACE, ToolOutput, WidgetRender, compose, output_template};
pub use context::ToolContext;
pub use descriptor::{META_PRODUCES_WIDGET, META_WIDGET_TEMPLATE, ToolDescriptor};
pub use dispatcher::Dispatcher;
pub use error::{HandlerFault, ToolError};
pub use result::{CallResult, ContentPart};
pub use validation::{InputSchema, ValidationFailure, Violation, validate_input};
