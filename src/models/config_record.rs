//! Configuration record model.
//!
//! A `ConfigRecord` is one row of the `dbrsettings` table: how a single data
//! entity is sourced, copied, transformed and loaded by the ingestion engine.
//! `ConfigFields` is the full replacement set an operator submits for an
//! insert or update (everything except the store-assigned `Id`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Columns that hold a serialized JSON document.
pub const JSON_COLUMNS: [&str; 6] = [
    "SourceSettings",
    "CopyQueries",
    "CopySettings",
    "SinkSettings",
    "ParseColumns",
    "UserDefineFunctions",
];

/// Format used for timestamp defaults on new records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored configuration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigRecord {
    pub id: i64,
    pub system: String,
    pub domain: String,
    pub source_type: String,
    pub source_settings: String,
    pub copy_queries: String,
    pub copy_settings: String,
    pub sink_settings: String,
    pub data_loading_behavior: String,
    pub entity_type: String,
    pub copy_enabled: bool,
    pub last_incremental_update: String,
    pub load_mark: bool,
    pub parse_columns: String,
    pub user_define_functions: String,
    pub last_ingestion_date: String,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date_purge: String,
}

/// Value of a JSON-bearing field as submitted by a caller.
///
/// Form input always arrives as text; the JSON API also accepts structured
/// values (objects, arrays, numbers) for these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonDocument {
    Text(String),
    Structured(Value),
}

impl JsonDocument {
    /// Borrow the text form, if this document is already text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            JsonDocument::Text(s) => Some(s),
            JsonDocument::Structured(_) => None,
        }
    }

    /// Convert into stored text. Structured values serialize compactly.
    pub fn into_text(self) -> String {
        match self {
            JsonDocument::Text(s) => s,
            JsonDocument::Structured(value) => value.to_string(),
        }
    }
}

impl Default for JsonDocument {
    fn default() -> Self {
        JsonDocument::Text(String::new())
    }
}

impl From<&str> for JsonDocument {
    fn from(s: &str) -> Self {
        JsonDocument::Text(s.to_string())
    }
}

impl From<String> for JsonDocument {
    fn from(s: String) -> Self {
        JsonDocument::Text(s)
    }
}

impl From<Value> for JsonDocument {
    fn from(value: Value) -> Self {
        JsonDocument::Structured(value)
    }
}

/// Complete set of non-Id fields for an insert or a full-row update.
///
/// Every field is required; there is no partial update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigFields {
    pub system: String,
    pub domain: String,
    pub source_type: String,
    pub source_settings: JsonDocument,
    pub copy_queries: JsonDocument,
    pub copy_settings: JsonDocument,
    pub sink_settings: JsonDocument,
    pub data_loading_behavior: String,
    pub entity_type: String,
    pub copy_enabled: bool,
    pub last_incremental_update: String,
    pub load_mark: bool,
    pub parse_columns: JsonDocument,
    pub user_define_functions: JsonDocument,
    pub last_ingestion_date: String,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date_purge: String,
}

impl ConfigFields {
    /// Blank field set used by the insert form.
    ///
    /// JSON fields start as `{}`, flags unset and the three dates at `now`.
    pub fn blank(now: &str) -> Self {
        let empty_object = || JsonDocument::from("{}");
        Self {
            system: String::new(),
            domain: String::new(),
            source_type: String::new(),
            source_settings: empty_object(),
            copy_queries: empty_object(),
            copy_settings: empty_object(),
            sink_settings: empty_object(),
            data_loading_behavior: String::new(),
            entity_type: String::new(),
            copy_enabled: false,
            last_incremental_update: now.to_string(),
            load_mark: false,
            parse_columns: empty_object(),
            user_define_functions: empty_object(),
            last_ingestion_date: now.to_string(),
            status_ingestion: false,
            load_purge: false,
            last_ingestion_date_purge: now.to_string(),
        }
    }

    /// The six JSON-bearing fields with their column names, in column order.
    pub fn json_fields_mut(&mut self) -> [(&'static str, &mut JsonDocument); 6] {
        [
            (JSON_COLUMNS[0], &mut self.source_settings),
            (JSON_COLUMNS[1], &mut self.copy_queries),
            (JSON_COLUMNS[2], &mut self.copy_settings),
            (JSON_COLUMNS[3], &mut self.sink_settings),
            (JSON_COLUMNS[4], &mut self.parse_columns),
            (JSON_COLUMNS[5], &mut self.user_define_functions),
        ]
    }
}

impl ConfigRecord {
    /// Build a stored record from an assigned Id and a field set.
    pub fn from_fields(id: i64, fields: ConfigFields) -> Self {
        Self {
            id,
            system: fields.system,
            domain: fields.domain,
            source_type: fields.source_type,
            source_settings: fields.source_settings.into_text(),
            copy_queries: fields.copy_queries.into_text(),
            copy_settings: fields.copy_settings.into_text(),
            sink_settings: fields.sink_settings.into_text(),
            data_loading_behavior: fields.data_loading_behavior,
            entity_type: fields.entity_type,
            copy_enabled: fields.copy_enabled,
            last_incremental_update: fields.last_incremental_update,
            load_mark: fields.load_mark,
            parse_columns: fields.parse_columns.into_text(),
            user_define_functions: fields.user_define_functions.into_text(),
            last_ingestion_date: fields.last_ingestion_date,
            status_ingestion: fields.status_ingestion,
            load_purge: fields.load_purge,
            last_ingestion_date_purge: fields.last_ingestion_date_purge,
        }
    }

    /// Field set that resubmits this record unchanged.
    pub fn to_fields(&self) -> ConfigFields {
        ConfigFields {
            system: self.system.clone(),
            domain: self.domain.clone(),
            source_type: self.source_type.clone(),
            source_settings: self.source_settings.clone().into(),
            copy_queries: self.copy_queries.clone().into(),
            copy_settings: self.copy_settings.clone().into(),
            sink_settings: self.sink_settings.clone().into(),
            data_loading_behavior: self.data_loading_behavior.clone(),
            entity_type: self.entity_type.clone(),
            copy_enabled: self.copy_enabled,
            last_incremental_update: self.last_incremental_update.clone(),
            load_mark: self.load_mark,
            parse_columns: self.parse_columns.clone().into(),
            user_define_functions: self.user_define_functions.clone().into(),
            last_ingestion_date: self.last_ingestion_date.clone(),
            status_ingestion: self.status_ingestion,
            load_purge: self.load_purge,
            last_ingestion_date_purge: self.last_ingestion_date_purge.clone(),
        }
    }

    /// The six JSON-bearing columns with their stored text, in column order.
    pub fn json_fields(&self) -> [(&'static str, &str); 6] {
        [
            (JSON_COLUMNS[0], self.source_settings.as_str()),
            (JSON_COLUMNS[1], self.copy_queries.as_str()),
            (JSON_COLUMNS[2], self.copy_settings.as_str()),
            (JSON_COLUMNS[3], self.sink_settings.as_str()),
            (JSON_COLUMNS[4], self.parse_columns.as_str()),
            (JSON_COLUMNS[5], self.user_define_functions.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> ConfigFields {
        let mut fields = ConfigFields::blank("2024-01-01 00:00:00");
        fields.system = "POS".to_string();
        fields.domain = "Sales".to_string();
        fields.source_type = "sqlserver".to_string();
        fields
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = ConfigRecord::from_fields(7, sample_fields());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["Id"], 7);
        assert_eq!(value["System"], "POS");
        assert_eq!(value["SourceSettings"], "{}");
        assert_eq!(value["UserDefineFunctions"], "{}");
        assert_eq!(value["LastIngestionDatePurge"], "2024-01-01 00:00:00");
        assert_eq!(value.as_object().unwrap().len(), 19);
    }

    #[test]
    fn test_json_document_accepts_text_or_structure() {
        let text: JsonDocument = serde_json::from_value(json!("{\"a\": 1}")).unwrap();
        assert_eq!(text, JsonDocument::Text("{\"a\": 1}".to_string()));

        let structured: JsonDocument = serde_json::from_value(json!({"a": 1})).unwrap();
        assert_eq!(structured, JsonDocument::Structured(json!({"a": 1})));

        let list: JsonDocument = serde_json::from_value(json!([1, 2])).unwrap();
        assert!(list.as_text().is_none());
    }

    #[test]
    fn test_fields_require_every_column() {
        let mut value = serde_json::to_value(sample_fields()).unwrap();
        value.as_object_mut().unwrap().remove("LoadPurge");

        assert!(serde_json::from_value::<ConfigFields>(value).is_err());
    }

    #[test]
    fn test_to_fields_round_trips_record() {
        let mut fields = sample_fields();
        fields.source_settings = json!({"host": "a"}).into();
        fields.copy_enabled = true;
        let record = ConfigRecord::from_fields(3, fields);

        let again = ConfigRecord::from_fields(3, record.to_fields());
        assert_eq!(again, record);
        assert_eq!(record.source_settings, r#"{"host":"a"}"#);
    }

    #[test]
    fn test_json_fields_in_column_order() {
        let mut fields = sample_fields();
        let names: Vec<_> = fields.json_fields_mut().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, JSON_COLUMNS);
    }
}
