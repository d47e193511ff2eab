//! Construction helpers for common tree shapes.
//!
//! - `json`: nested side-button trees from arbitrary JSON values
//! - `merge`: packing runs of plain text nodes into fewer section blocks

mod json;
mod merge;

pub use json::{from_json, json_children};
pub use merge::merge_simple;
