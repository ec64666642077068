//! Records listing and detail handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Redirect, Response},
};

use super::super::template_structs::{
    FilterSelect, JsonBlock, RecordDetailTemplate, RecordRow, RecordsTemplate,
};
use super::super::AppState;
use super::helpers::{not_found_page, render, store_error_page, DetailParams, ListParams};
use crate::store::distinct_values;

/// Root redirects to the listing.
pub async fn index() -> Redirect {
    Redirect::to("/records")
}

/// Records table with System / Domain / SourceType filters.
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let records = match state.store.list_records().await {
        Ok(records) => records,
        Err(e) => return store_error_page("Failed to load records", &e),
    };

    let filter = params.filter();
    let filters = vec![
        FilterSelect::new(
            "system",
            "System",
            distinct_values(&records, |r| r.system.as_str()),
            filter.system.as_deref(),
        ),
        FilterSelect::new(
            "domain",
            "Domain",
            distinct_values(&records, |r| r.domain.as_str()),
            filter.domain.as_deref(),
        ),
        FilterSelect::new(
            "source_type",
            "Source Type",
            distinct_values(&records, |r| r.source_type.as_str()),
            filter.source_type.as_deref(),
        ),
    ];

    let rows: Vec<RecordRow> = filter
        .apply(&records)
        .into_iter()
        .map(RecordRow::from)
        .collect();

    let notice = params
        .deleted
        .map(|id| format!("Record {} deleted.", id))
        .unwrap_or_default();

    let template = RecordsTemplate {
        title: "DBR Settings",
        shown: rows.len(),
        total: records.len(),
        rows,
        filters,
        has_notice: !notice.is_empty(),
        notice,
    };
    render(&template, StatusCode::OK)
}

/// Detail view of one record.
pub async fn record_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DetailParams>,
) -> Response {
    let record = match state.store.get_record(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found_page(id),
        Err(e) => return store_error_page("Failed to load record", &e),
    };

    let title = format!("Record {}", record.id);
    let template = RecordDetailTemplate {
        title: &title,
        json_blocks: JsonBlock::for_record(&record),
        record: &record,
        saved: params.saved.is_some(),
    };
    render(&template, StatusCode::OK)
}
