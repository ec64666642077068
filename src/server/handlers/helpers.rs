//! Helper types and utility functions for handlers.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::super::template_structs::{ErrorTemplate, FlagInput, JsonInput, TextInput};
use crate::models::{ConfigFields, ConfigRecord, JsonDocument, JSON_COLUMNS, TIMESTAMP_FORMAT};
use crate::store::{RecordFilter, StoreError};
use crate::utils::pretty_json;

/// Query params for the records listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub system: Option<String>,
    pub domain: Option<String>,
    pub source_type: Option<String>,
    pub deleted: Option<i64>,
}

impl ListParams {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new(
            self.system.as_deref(),
            self.domain.as_deref(),
            self.source_type.as_deref(),
        )
    }
}

/// Query params for the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    pub saved: Option<String>,
}

/// Insert/edit form submission.
///
/// Every text field must be present. Checkboxes are only present in the body
/// when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordForm {
    pub system: String,
    pub domain: String,
    pub source_type: String,
    pub source_settings: String,
    pub copy_queries: String,
    pub copy_settings: String,
    pub sink_settings: String,
    pub data_loading_behavior: String,
    pub entity_type: String,
    #[serde(default)]
    pub copy_enabled: Option<String>,
    pub last_incremental_update: String,
    #[serde(default)]
    pub load_mark: Option<String>,
    pub parse_columns: String,
    pub user_define_functions: String,
    pub last_ingestion_date: String,
    #[serde(default)]
    pub status_ingestion: Option<String>,
    #[serde(default)]
    pub load_purge: Option<String>,
    pub last_ingestion_date_purge: String,
}

fn checkbox(checked: bool) -> Option<String> {
    checked.then(|| "on".to_string())
}

impl RecordForm {
    /// Form pre-filled for a new record, timestamps at the current local time.
    pub fn blank() -> Self {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::from_fields(ConfigFields::blank(&now))
    }

    /// Form pre-filled from a field set, JSON fields pretty-printed.
    pub fn from_fields(fields: ConfigFields) -> Self {
        let pretty = |doc: JsonDocument| pretty_json(&doc.into_text());
        Self {
            system: fields.system,
            domain: fields.domain,
            source_type: fields.source_type,
            source_settings: pretty(fields.source_settings),
            copy_queries: pretty(fields.copy_queries),
            copy_settings: pretty(fields.copy_settings),
            sink_settings: pretty(fields.sink_settings),
            data_loading_behavior: fields.data_loading_behavior,
            entity_type: fields.entity_type,
            copy_enabled: checkbox(fields.copy_enabled),
            last_incremental_update: fields.last_incremental_update,
            load_mark: checkbox(fields.load_mark),
            parse_columns: pretty(fields.parse_columns),
            user_define_functions: pretty(fields.user_define_functions),
            last_ingestion_date: fields.last_ingestion_date,
            status_ingestion: checkbox(fields.status_ingestion),
            load_purge: checkbox(fields.load_purge),
            last_ingestion_date_purge: fields.last_ingestion_date_purge,
        }
    }

    /// Convert the submission into a full field set.
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
            copy_enabled: self.copy_enabled.is_some(),
            last_incremental_update: self.last_incremental_update.clone(),
            load_mark: self.load_mark.is_some(),
            parse_columns: self.parse_columns.clone().into(),
            user_define_functions: self.user_define_functions.clone().into(),
            last_ingestion_date: self.last_ingestion_date.clone(),
            status_ingestion: self.status_ingestion.is_some(),
            load_purge: self.load_purge.is_some(),
            last_ingestion_date_purge: self.last_ingestion_date_purge.clone(),
        }
    }

    /// Convert an edit submission of `current` into a full field set.
    ///
    /// A JSON field whose submitted text is the same document as the stored
    /// text keeps the stored text, so the pretty-printed prefill does not
    /// reformat untouched columns.
    pub fn to_fields_over(&self, current: &ConfigRecord) -> ConfigFields {
        let mut fields = self.to_fields();
        let stored = current.json_fields();
        for ((_, submitted), (_, stored)) in fields.json_fields_mut().into_iter().zip(stored) {
            if same_document(submitted, stored) {
                *submitted = JsonDocument::from(stored);
            }
        }
        fields
    }

    pub fn identity_inputs(&self) -> Vec<TextInput> {
        vec![
            text_input("System", "System", &self.system),
            text_input("Domain", "Domain", &self.domain),
            text_input("SourceType", "Source Type", &self.source_type),
        ]
    }

    pub fn json_inputs(&self) -> Vec<JsonInput> {
        let values = [
            &self.source_settings,
            &self.copy_queries,
            &self.copy_settings,
            &self.sink_settings,
            &self.parse_columns,
            &self.user_define_functions,
        ];
        let labels = [
            "Source Settings",
            "Copy Queries",
            "Copy Settings",
            "Sink Settings",
            "Parse Columns",
            "User Define Functions",
        ];
        JSON_COLUMNS
            .into_iter()
            .zip(labels)
            .zip(values)
            .map(|((name, label), value)| JsonInput {
                name,
                label,
                value: value.clone(),
            })
            .collect()
    }

    pub fn behavior_inputs(&self) -> Vec<TextInput> {
        vec![
            text_input(
                "DataLoadingBehavior",
                "Data Loading Behavior",
                &self.data_loading_behavior,
            ),
            text_input("EntityType", "Entity Type", &self.entity_type),
        ]
    }

    pub fn flag_inputs(&self) -> Vec<FlagInput> {
        vec![
            flag_input("CopyEnabled", "Copy Enabled", &self.copy_enabled),
            flag_input("LoadMark", "Load Mark", &self.load_mark),
            flag_input("StatusIngestion", "Status Ingestion", &self.status_ingestion),
            flag_input("LoadPurge", "Load Purge", &self.load_purge),
        ]
    }

    pub fn date_inputs(&self) -> Vec<TextInput> {
        vec![
            text_input(
                "LastIncrementalUpdate",
                "Last Incremental Update",
                &self.last_incremental_update,
            ),
            text_input(
                "LastIngestionDate",
                "Last Ingestion Date",
                &self.last_ingestion_date,
            ),
            text_input(
                "LastIngestionDatePurge",
                "Last Ingestion Date Purge",
                &self.last_ingestion_date_purge,
            ),
        ]
    }
}

fn same_document(submitted: &JsonDocument, stored: &str) -> bool {
    let Some(text) = submitted.as_text() else {
        return false;
    };
    if text == stored {
        return true;
    }
    match (
        serde_json::from_str::<serde_json::Value>(text),
        serde_json::from_str::<serde_json::Value>(stored),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn text_input(name: &'static str, label: &'static str, value: &str) -> TextInput {
    TextInput {
        name,
        label,
        value: value.to_string(),
    }
}

fn flag_input(name: &'static str, label: &'static str, value: &Option<String>) -> FlagInput {
    FlagInput {
        name,
        label,
        checked: value.is_some(),
    }
}

/// Delete confirmation submission.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

/// Render a template, falling back to the raw error text.
pub fn render<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Error page for a failed store operation.
pub fn store_error_page(action: &str, err: &StoreError) -> Response {
    tracing::error!("{}: {}", action, err);
    let message = format!("{}: {}", action, err);
    let template = ErrorTemplate {
        title: "Error",
        message: &message,
        show_hint: matches!(err, StoreError::Database(_)),
    };
    render(&template, StatusCode::INTERNAL_SERVER_ERROR)
}

/// 404 page for an unknown record Id.
pub fn not_found_page(id: i64) -> Response {
    let message = format!("No record with Id {} exists.", id);
    let template = ErrorTemplate {
        title: "Not Found",
        message: &message,
        show_hint: false,
    };
    render(&template, StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every text field of the form, no checkboxes ticked.
    fn text_fields() -> serde_json::Value {
        serde_json::json!({
            "System": "POS",
            "Domain": "Sales",
            "SourceType": "sqlserver",
            "SourceSettings": "{}",
            "CopyQueries": "{}",
            "CopySettings": "{}",
            "SinkSettings": "{}",
            "DataLoadingBehavior": "",
            "EntityType": "",
            "LastIncrementalUpdate": "",
            "ParseColumns": "{}",
            "UserDefineFunctions": "{}",
            "LastIngestionDate": "",
            "LastIngestionDatePurge": ""
        })
    }

    #[test]
    fn test_unchecked_boxes_become_false() {
        let mut body = text_fields();
        body["CopyEnabled"] = "on".into();
        let form: RecordForm = serde_json::from_value(body).unwrap();
        let fields = form.to_fields();
        assert_eq!(fields.system, "POS");
        assert!(fields.copy_enabled);
        assert!(!fields.load_mark);
        assert!(!fields.load_purge);
        assert_eq!(fields.source_settings.as_text(), Some("{}"));
    }

    #[test]
    fn test_form_round_trips_flags() {
        let mut fields = ConfigFields::blank("2024-01-01 00:00:00");
        fields.status_ingestion = true;
        fields.copy_queries = r#"{"q":"select 1"}"#.into();

        let form = RecordForm::from_fields(fields);
        assert_eq!(form.status_ingestion.as_deref(), Some("on"));
        assert_eq!(form.copy_queries, "{\n  \"q\": \"select 1\"\n}");

        let flags = form.flag_inputs();
        assert!(!flags[0].checked);
        assert!(flags[2].checked);
        assert_eq!(form.json_inputs()[1].name, "CopyQueries");
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = RecordForm::blank();
        assert_eq!(form.sink_settings, "{}");
        assert!(form.copy_enabled.is_none());
        assert_eq!(form.last_ingestion_date.len(), 19);
    }

    #[test]
    fn test_list_params_empty_selection_is_no_filter() {
        let params = ListParams {
            system: Some(String::new()),
            domain: Some("Sales".to_string()),
            source_type: Some("All".to_string()),
            ..Default::default()
        };
        let filter = params.filter();
        assert!(filter.system.is_none());
        assert_eq!(filter.domain.as_deref(), Some("Sales"));
        assert_eq!(filter.source_type.as_deref(), Some("All"));
    }

    #[test]
    fn test_edit_keeps_stored_text_for_unchanged_documents() {
        let mut fields = ConfigFields::blank("2024-01-01 00:00:00");
        fields.source_settings = r#"{"host":"db01","port":1433}"#.into();
        fields.copy_queries = r#"{"q":"select 1"}"#.into();
        fields.sink_settings = "legacy raw text".into();
        let current = ConfigRecord::from_fields(5, fields);

        let mut form = RecordForm::from_fields(current.to_fields());
        assert_ne!(form.source_settings, current.source_settings);
        form.copy_enabled = Some("on".to_string());
        form.copy_queries = r#"{"q": "select 2"}"#.to_string();

        let submitted = form.to_fields_over(&current);
        assert!(submitted.copy_enabled);
        assert_eq!(
            submitted.source_settings,
            JsonDocument::from(r#"{"host":"db01","port":1433}"#)
        );
        assert_eq!(submitted.sink_settings, JsonDocument::from("legacy raw text"));
        assert_eq!(submitted.copy_queries, JsonDocument::from(r#"{"q": "select 2"}"#));
    }

    #[test]
    fn test_form_requires_text_fields() {
        let mut missing_domain = text_fields();
        missing_domain.as_object_mut().unwrap().remove("Domain");
        assert!(serde_json::from_value::<RecordForm>(missing_domain).is_err());

        let form: RecordForm = serde_json::from_value(text_fields()).unwrap();
        assert!(form.copy_enabled.is_none());
        assert!(form.load_purge.is_none());
    }
}
