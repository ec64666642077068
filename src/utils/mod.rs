//! Shared utility functions.

mod json;

pub use json::{json_preview, pretty_json};
