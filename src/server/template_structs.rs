//! Askama template structs for the web console.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Askama provides compile-time verification that templates are valid.

use askama::Template;

use crate::models::ConfigRecord;
use crate::store::ALL;
use crate::utils::{json_preview, pretty_json};

/// Width of JSON previews in the listing table.
const PREVIEW_CHARS: usize = 60;

/// Helper struct for rows in the records table.
pub struct RecordRow {
    pub id: i64,
    pub system: String,
    pub domain: String,
    pub source_type: String,
    pub entity_type: String,
    pub data_loading_behavior: String,
    pub source_preview: String,
    pub copy_enabled: bool,
    pub load_mark: bool,
    pub status_ingestion: bool,
    pub load_purge: bool,
    pub last_ingestion_date: String,
}

impl From<&ConfigRecord> for RecordRow {
    fn from(record: &ConfigRecord) -> Self {
        Self {
            id: record.id,
            system: record.system.clone(),
            domain: record.domain.clone(),
            source_type: record.source_type.clone(),
            entity_type: record.entity_type.clone(),
            data_loading_behavior: record.data_loading_behavior.clone(),
            source_preview: json_preview(&record.source_settings, PREVIEW_CHARS),
            copy_enabled: record.copy_enabled,
            load_mark: record.load_mark,
            status_ingestion: record.status_ingestion,
            load_purge: record.load_purge,
            last_ingestion_date: record.last_ingestion_date.clone(),
        }
    }
}

/// One option of a filter select.
pub struct FilterOption {
    pub value: String,
    pub selected: bool,
}

/// A filter select over one identifying column.
pub struct FilterSelect {
    /// Query parameter name.
    pub param: &'static str,
    pub label: &'static str,
    pub all_label: &'static str,
    pub all_selected: bool,
    pub options: Vec<FilterOption>,
}

impl FilterSelect {
    pub fn new(
        param: &'static str,
        label: &'static str,
        values: Vec<String>,
        active: Option<&str>,
    ) -> Self {
        let options = values
            .into_iter()
            .map(|value| FilterOption {
                selected: active == Some(value.as_str()),
                value,
            })
            .collect();
        Self {
            param,
            label,
            all_label: ALL,
            all_selected: active.is_none(),
            options,
        }
    }
}

/// A pretty-printed JSON-bearing field on the detail page.
pub struct JsonBlock {
    pub name: &'static str,
    pub pretty: String,
    pub is_empty: bool,
}

impl JsonBlock {
    pub fn for_record(record: &ConfigRecord) -> Vec<Self> {
        record
            .json_fields()
            .into_iter()
            .map(|(name, text)| Self {
                name,
                pretty: pretty_json(text),
                is_empty: text.is_empty(),
            })
            .collect()
    }
}

/// A JSON textarea on the insert/edit form.
pub struct JsonInput {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// A state flag checkbox on the insert/edit form.
pub struct FlagInput {
    pub name: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// A free-text input on the insert/edit form.
pub struct TextInput {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Records listing with filters.
#[derive(Template)]
#[template(path = "records.html")]
pub struct RecordsTemplate<'a> {
    pub title: &'a str,
    pub rows: Vec<RecordRow>,
    pub filters: Vec<FilterSelect>,
    pub shown: usize,
    pub total: usize,
    pub has_notice: bool,
    pub notice: String,
}

/// Record detail page.
#[derive(Template)]
#[template(path = "record_detail.html")]
pub struct RecordDetailTemplate<'a> {
    pub title: &'a str,
    pub record: &'a ConfigRecord,
    pub json_blocks: Vec<JsonBlock>,
    pub saved: bool,
}

/// Insert and edit form.
#[derive(Template)]
#[template(path = "record_form.html")]
pub struct RecordFormTemplate<'a> {
    pub title: &'a str,
    pub action: String,
    pub submit_label: &'a str,
    pub cancel_href: String,
    pub identity: Vec<TextInput>,
    pub json_inputs: Vec<JsonInput>,
    pub behavior: Vec<TextInput>,
    pub flags: Vec<FlagInput>,
    pub dates: Vec<TextInput>,
    pub has_error: bool,
    pub error_message: String,
}

/// Delete confirmation page.
#[derive(Template)]
#[template(path = "delete.html")]
pub struct DeleteTemplate<'a> {
    pub title: &'a str,
    pub record: &'a ConfigRecord,
    pub show_warning: bool,
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub show_hint: bool,
}
