//! JSON API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::super::AppState;
use crate::models::ConfigFields;
use crate::store::{RecordFilter, StoreError};

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn store_error_response(err: StoreError) -> Response {
    let status = match err {
        StoreError::InvalidJson { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::DuplicateId(_) => StatusCode::CONFLICT,
        StoreError::Database(_) => {
            tracing::error!("API store failure: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, err.to_string())
}

fn not_found(id: i64) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("No record with Id {}", id))
}

/// List records, optionally filtered by system, domain and source_type.
pub async fn api_list_records(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Response {
    let filter = filter.normalized();
    match state.store.list_filtered(&filter).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Fetch one record.
pub async fn api_get_record(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_record(id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => not_found(id),
        Err(e) => store_error_response(e),
    }
}

/// Insert a record. JSON-bearing fields may be strings or structured JSON.
pub async fn api_create_record(
    State(state): State<AppState>,
    Json(fields): Json<ConfigFields>,
) -> Response {
    match state.store.insert_record(fields).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Replace every field of a record.
pub async fn api_update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<ConfigFields>,
) -> Response {
    match state.store.update_record(id, fields).await {
        Ok(updated) => Json(json!({ "updated": updated })).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Delete a record.
pub async fn api_delete_record(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.delete_record(id).await {
        Ok(deleted) => Json(json!({ "deleted": deleted })).into_response(),
        Err(e) => store_error_response(e),
    }
}
