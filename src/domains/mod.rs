//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: tool catalog, validation, dispatch and result composition
//! - **widgets**: widget templates, hydration data and the asset store

pub mod tools;
pub mod widgets;
