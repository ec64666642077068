//! Delete confirmation handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::super::template_structs::DeleteTemplate;
use super::super::AppState;
use super::helpers::{not_found_page, render, store_error_page, DeleteForm};
use crate::models::ConfigRecord;

fn delete_page(record: &ConfigRecord, show_warning: bool) -> Response {
    let title = format!("Delete Record {}", record.id);
    let template = DeleteTemplate {
        title: &title,
        record,
        show_warning,
    };
    render(&template, StatusCode::OK)
}

/// Confirmation page showing what is about to be deleted.
pub async fn delete_confirm(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_record(id).await {
        Ok(Some(record)) => delete_page(&record, false),
        Ok(None) => not_found_page(id),
        Err(e) => store_error_page("Failed to load record", &e),
    }
}

/// Delete a record once the confirmation box is ticked.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if form.confirm.is_none() {
        return match state.store.get_record(id).await {
            Ok(Some(record)) => delete_page(&record, true),
            Ok(None) => not_found_page(id),
            Err(e) => store_error_page("Failed to load record", &e),
        };
    }

    match state.store.delete_record(id).await {
        Ok(0) => not_found_page(id),
        Ok(_) => Redirect::to(&format!("/records?deleted={}", id)).into_response(),
        Err(e) => store_error_page("Failed to delete record", &e),
    }
}
