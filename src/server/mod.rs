//! Web console for the dbrsettings table.
//!
//! Server-rendered pages for browsing, inserting, editing and deleting
//! configuration records, plus a small JSON API over the same store.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;

use crate::config::Settings;
use crate::store::ConfigRecordStore;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: ConfigRecordStore,
}

impl AppState {
    pub fn new(store: ConfigRecordStore) -> Self {
        Self { store }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let (_, store) = settings.create_store()?;
        Ok(Self::new(store))
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::models::{ConfigFields, ConfigRecord};
    use crate::repository::DbContext;
    use crate::store::JsonPolicy;

    async fn setup_test_app() -> (axum::Router, DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_sqlite_path(&dir.path().join("dbrsettings.db"));
        ctx.init_schema().await.unwrap();

        let store = ConfigRecordStore::new(&ctx, Duration::from_secs(60), JsonPolicy::Wrap);
        let app = create_router(AppState::new(store));
        (app, ctx, dir)
    }

    async fn seed(ctx: &DbContext, id: i64, system: &str, domain: &str, source_type: &str) {
        let mut fields = ConfigFields::blank("2024-01-01 00:00:00");
        fields.system = system.to_string();
        fields.domain = domain.to_string();
        fields.source_type = source_type.to_string();
        fields.source_settings = r#"{"host":"db01"}"#.into();
        ctx.config_records()
            .insert(&ConfigRecord::from_fields(id, fields))
            .await
            .unwrap();
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    const NEW_RECORD_FORM: &str = "System=POS&Domain=Sales&SourceType=sqlserver\
        &SourceSettings=%7B%22host%22%3A%20%22db01%22%7D&CopyQueries=%7B%7D&CopySettings=%7B%7D\
        &SinkSettings=not%20json&DataLoadingBehavior=incremental&EntityType=table\
        &CopyEnabled=on&LastIncrementalUpdate=2024-01-01%2000%3A00%3A00&ParseColumns=%7B%7D\
        &UserDefineFunctions=%7B%7D&LastIngestionDate=2024-01-01%2000%3A00%3A00\
        &LastIngestionDatePurge=2024-01-01%2000%3A00%3A00";

    #[tokio::test]
    async fn test_root_redirects_to_records() {
        let (app, _ctx, _dir) = setup_test_app().await;
        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/records");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _ctx, _dir) = setup_test_app().await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_records_page_filters() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 1, "POS", "Sales", "sqlserver").await;
        seed(&ctx, 2, "ERP", "Finance", "oracle").await;

        let response = app
            .clone()
            .oneshot(get("/records?system=POS&domain="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("href=\"/records/1\""));
        assert!(!html.contains("href=\"/records/2\""));
        assert!(html.contains("Showing 1 of 2"));
        // ERP still offered as a filter option
        assert!(html.contains("<option value=\"ERP\""));
    }

    #[tokio::test]
    async fn test_records_page_selects_value_named_all() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 1, "All", "Sales", "sqlserver").await;
        seed(&ctx, 2, "POS", "Sales", "sqlserver").await;

        let response = app.clone().oneshot(get("/records?system=All")).await.unwrap();
        let html = body_string(response).await;
        assert!(html.contains("href=\"/records/1\""));
        assert!(!html.contains("href=\"/records/2\""));
        assert!(html.contains("<option value=\"All\" selected>All</option>"));

        let response = app.oneshot(get("/records?system=")).await.unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Showing 2 of 2"));
        assert!(html.contains("<option value=\"\" selected>All</option>"));
    }

    #[tokio::test]
    async fn test_detail_page_and_not_found() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 5, "POS", "Sales", "sqlserver").await;

        let response = app.clone().oneshot(get("/records/5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Record 5"));
        assert!(html.contains("&quot;host&quot;: &quot;db01&quot;"));

        let response = app.oneshot(get("/records/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_new_form_defaults() {
        let (app, _ctx, _dir) = setup_test_app().await;
        let response = app.oneshot(get("/records/new")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("name=\"SourceSettings\">{}</textarea>"));
        assert!(!html.contains("checked"));
    }

    #[tokio::test]
    async fn test_insert_via_form_redirects_to_detail() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 41, "ERP", "Finance", "oracle").await;

        let response = app
            .clone()
            .oneshot(form_post("/records/new", NEW_RECORD_FORM))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/records/42?saved=1");

        let stored = ctx.config_records().get(42).await.unwrap().unwrap();
        assert_eq!(stored.system, "POS");
        assert!(stored.copy_enabled);
        assert!(!stored.load_mark);
        assert_eq!(stored.source_settings, r#"{"host": "db01"}"#);
        assert_eq!(stored.sink_settings, r#""not json""#);

        let response = app.oneshot(get("/records")).await.unwrap();
        let html = body_string(response).await;
        assert!(html.contains("href=\"/records/42\""));
    }

    #[tokio::test]
    async fn test_edit_via_form_replaces_fields() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 5, "ERP", "Finance", "oracle").await;

        let response = app
            .clone()
            .oneshot(form_post("/records/5/edit", NEW_RECORD_FORM))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/records/5?saved=1");

        let stored = ctx.config_records().get(5).await.unwrap().unwrap();
        assert_eq!(stored.system, "POS");
        assert!(stored.copy_enabled);

        let response = app
            .oneshot(form_post("/records/77/edit", NEW_RECORD_FORM))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_flag_only_leaves_other_fields_untouched() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 5, "ERP", "Finance", "oracle").await;
        let before = ctx.config_records().get(5).await.unwrap().unwrap();

        // Same values the edit form renders, SourceSettings pretty-printed.
        let body = "System=ERP&Domain=Finance&SourceType=oracle\
            &SourceSettings=%7B%0A%20%20%22host%22%3A%20%22db01%22%0A%7D\
            &CopyQueries=%7B%7D&CopySettings=%7B%7D&SinkSettings=%7B%7D\
            &DataLoadingBehavior=&EntityType=&CopyEnabled=on\
            &LastIncrementalUpdate=2024-01-01%2000%3A00%3A00\
            &ParseColumns=%7B%7D&UserDefineFunctions=%7B%7D\
            &LastIngestionDate=2024-01-01%2000%3A00%3A00\
            &LastIngestionDatePurge=2024-01-01%2000%3A00%3A00";
        let response = app
            .oneshot(form_post("/records/5/edit", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let after = ctx.config_records().get(5).await.unwrap().unwrap();
        let mut expected = before;
        expected.copy_enabled = true;
        assert_eq!(after, expected);
        assert_eq!(after.source_settings, r#"{"host":"db01"}"#);
    }

    #[tokio::test]
    async fn test_form_missing_text_field_is_rejected() {
        let (app, ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(form_post("/records/new", "System=POS&CopyEnabled=on"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        assert!(ctx.config_records().get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (app, ctx, _dir) = setup_test_app().await;
        seed(&ctx, 3, "POS", "Sales", "sqlserver").await;

        let response = app
            .clone()
            .oneshot(form_post("/records/3/delete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Please confirm the deletion"));
        assert!(ctx.config_records().get(3).await.unwrap().is_some());

        let response = app
            .oneshot(form_post("/records/3/delete", "confirm=yes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/records?deleted=3");
        assert!(ctx.config_records().get(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_api_crud() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let mut fields = serde_json::to_value(ConfigFields::blank("2024-01-01 00:00:00")).unwrap();
        fields["System"] = "POS".into();
        fields["CopySettings"] = serde_json::json!({"batch": 500});

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(fields.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["id"], 1);

        let response = app.clone().oneshot(get("/api/records/1")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["CopySettings"], r#"{"batch":500}"#);
        assert_eq!(json["System"], "POS");

        fields["LoadPurge"] = true.into();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/records/1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(fields.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["updated"], 1);

        let response = app
            .clone()
            .oneshot(get("/api/records?system=POS"))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["LoadPurge"], true);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/records/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["deleted"], 1);

        let response = app.oneshot(get("/api/records/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_table_shows_hint() {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_sqlite_path(&dir.path().join("empty.db"));
        let store = ConfigRecordStore::new(&ctx, Duration::from_secs(60), JsonPolicy::Wrap);
        let app = create_router(AppState::new(store));

        let response = app.oneshot(get("/records")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_string(response).await;
        assert!(html.contains("dbrsettings init"));
    }

    #[tokio::test]
    async fn test_serves_css() {
        let (app, _ctx, _dir) = setup_test_app().await;
        let response = app.oneshot(get("/static/style.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
