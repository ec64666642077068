//! JSON normalization for the six JSON-bearing columns.
//!
//! Text that already parses is kept byte-for-byte, structured values are
//! serialized compactly, and text that does not parse is handled according
//! to the configured [`JsonPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StoreError;
use crate::models::{ConfigFields, JsonDocument};

/// What to do with JSON-bearing text that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonPolicy {
    /// Store the text as a JSON string literal of itself.
    #[default]
    Wrap,
    /// Refuse the write with [`StoreError::InvalidJson`].
    Reject,
}

impl JsonPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonPolicy::Wrap => "wrap",
            JsonPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for JsonPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(JsonPolicy::Wrap),
            "reject" => Ok(JsonPolicy::Reject),
            other => Err(format!(
                "unknown invalid-JSON policy '{}' (expected 'wrap' or 'reject')",
                other
            )),
        }
    }
}

/// Normalize one JSON-bearing value into text.
pub fn normalize_document(
    column: &'static str,
    document: JsonDocument,
    policy: JsonPolicy,
) -> Result<JsonDocument, StoreError> {
    let text = match document {
        JsonDocument::Structured(value) => return Ok(JsonDocument::Text(value.to_string())),
        JsonDocument::Text(text) => text,
    };

    if text.is_empty() {
        return Ok(JsonDocument::Text(text));
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(_) => Ok(JsonDocument::Text(text)),
        Err(source) => match policy {
            JsonPolicy::Wrap => {
                tracing::debug!("{} is not valid JSON ({}), storing as a string", column, source);
                Ok(JsonDocument::Text(Value::String(text).to_string()))
            }
            JsonPolicy::Reject => Err(StoreError::InvalidJson { column, source }),
        },
    }
}

/// Normalize every JSON-bearing field of a field set.
///
/// On success all six fields are [`JsonDocument::Text`]. With
/// [`JsonPolicy::Wrap`] this never fails.
pub fn normalize_json_fields(
    mut fields: ConfigFields,
    policy: JsonPolicy,
) -> Result<ConfigFields, StoreError> {
    for (column, slot) in fields.json_fields_mut() {
        let document = std::mem::take(slot);
        *slot = normalize_document(column, document, policy)?;
    }
    Ok(fields)
}
