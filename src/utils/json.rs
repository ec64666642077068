//! JSON display helpers.

use serde_json::Value;

/// Re-indent JSON text with two spaces for display.
///
/// Text that does not parse, and empty text, is returned unchanged.
pub fn pretty_json(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    serde_json::from_str::<Value>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| text.to_string())
}

/// One-line preview of JSON text for table cells.
pub fn json_preview(text: &str, max_chars: usize) -> String {
    let compact = serde_json::from_str::<Value>(text)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| text.split_whitespace().collect::<Vec<_>>().join(" "));

    if compact.chars().count() <= max_chars {
        compact
    } else {
        let truncated: String = compact.chars().take(max_chars).collect();
        format!("{}…", truncated)
    }
}
