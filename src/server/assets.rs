//! Static asset constants.

/// Stylesheet for the web console.
pub const CSS: &str = include_str!("styles.css");
