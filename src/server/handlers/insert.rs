//! Insert form handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::super::template_structs::RecordFormTemplate;
use super::super::AppState;
use super::helpers::{render, store_error_page, RecordForm};

/// Build the insert/edit form page.
pub(super) fn form_page(
    title: &str,
    action: String,
    submit_label: &str,
    cancel_href: String,
    form: &RecordForm,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let template = RecordFormTemplate {
        title,
        action,
        submit_label,
        cancel_href,
        identity: form.identity_inputs(),
        json_inputs: form.json_inputs(),
        behavior: form.behavior_inputs(),
        flags: form.flag_inputs(),
        dates: form.date_inputs(),
        has_error: error.is_some(),
        error_message: error.unwrap_or_default(),
    };
    render(&template, status)
}

fn insert_page(form: &RecordForm, error: Option<String>, status: StatusCode) -> Response {
    form_page(
        "New Record",
        "/records/new".to_string(),
        "Insert Record",
        "/records".to_string(),
        form,
        error,
        status,
    )
}

/// Blank insert form.
pub async fn new_record_form() -> Response {
    insert_page(&RecordForm::blank(), None, StatusCode::OK)
}

/// Insert a record and redirect to its detail page.
pub async fn create_record(
    State(state): State<AppState>,
    Form(form): Form<RecordForm>,
) -> Response {
    match state.store.insert_record(form.to_fields()).await {
        Ok(id) => Redirect::to(&format!("/records/{}?saved=1", id)).into_response(),
        Err(e) if e.is_invalid_input() => {
            insert_page(&form, Some(e.to_string()), StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => store_error_page("Failed to insert record", &e),
    }
}
