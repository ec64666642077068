//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("A record with Id {0} already exists")]
    DuplicateId(i64),
    #[error("{column} is not valid JSON: {source}")]
    InvalidJson {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether the failure came from input the operator can correct.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StoreError::InvalidJson { .. })
    }
}
