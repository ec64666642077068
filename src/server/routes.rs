//! Router configuration for the web console.

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Console pages
        .route("/records", get(handlers::list_records))
        .route(
            "/records/new",
            get(handlers::new_record_form).post(handlers::create_record),
        )
        .route("/records/:id", get(handlers::record_detail))
        .route(
            "/records/:id/edit",
            get(handlers::edit_record_form).post(handlers::update_record),
        )
        .route(
            "/records/:id/delete",
            get(handlers::delete_confirm).post(handlers::delete_record),
        )
        // JSON API
        .route(
            "/api/records",
            get(handlers::api_list_records).post(handlers::api_create_record),
        )
        .route(
            "/api/records/:id",
            get(handlers::api_get_record)
                .put(handlers::api_update_record)
                .delete(handlers::api_delete_record),
        )
        .route("/health", get(handlers::health))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
