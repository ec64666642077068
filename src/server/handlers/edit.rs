//! Edit form handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::super::AppState;
use super::helpers::{not_found_page, store_error_page, RecordForm};
use super::insert::form_page;

fn edit_page(id: i64, form: &RecordForm, error: Option<String>, status: StatusCode) -> Response {
    form_page(
        &format!("Edit Record {}", id),
        format!("/records/{}/edit", id),
        "Update Record",
        format!("/records/{}", id),
        form,
        error,
        status,
    )
}

/// Edit form pre-filled with the stored record.
pub async fn edit_record_form(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_record(id).await {
        Ok(Some(record)) => edit_page(
            id,
            &RecordForm::from_fields(record.to_fields()),
            None,
            StatusCode::OK,
        ),
        Ok(None) => not_found_page(id),
        Err(e) => store_error_page("Failed to load record", &e),
    }
}

/// Replace every field of a record and redirect to its detail page.
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<RecordForm>,
) -> Response {
    let current = match state.store.get_record(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found_page(id),
        Err(e) => return store_error_page("Failed to load record", &e),
    };

    match state.store.update_record(id, form.to_fields_over(&current)).await {
        Ok(0) => not_found_page(id),
        Ok(_) => Redirect::to(&format!("/records/{}?saved=1", id)).into_response(),
        Err(e) if e.is_invalid_input() => {
            edit_page(id, &form, Some(e.to_string()), StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => store_error_page("Failed to update record", &e),
    }
}
