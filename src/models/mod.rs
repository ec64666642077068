//! Data models for the configuration console.

mod config_record;

pub use config_record::{ConfigFields, ConfigRecord, JsonDocument, JSON_COLUMNS, TIMESTAMP_FORMAT};
