//! Security module: restricts which files tools may read.

pub mod path_policy;

pub use path_policy::{PathPolicyError, resolve_path};
