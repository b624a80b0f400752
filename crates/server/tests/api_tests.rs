//! Host channel tests: every route driven in-process against the mock
//! service.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;
use sonarr_provider_core::sdk::{Endpoint, Method};

// =============================================================================
// Health, schema and configure
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["configured"], false);
}

#[tokio::test]
async fn test_schema_lists_every_type() {
    let fixture = TestFixture::new();
    let response = fixture.get("/v1/schema").await;

    assert_status!(response, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["provider"]["attributes"]["api_key"]["sensitive"], true);

    let qbittorrent = &body["resources"]["sonarr_download_client_qbittorrent"];
    assert_eq!(qbittorrent["attributes"]["password"]["sensitive"], true);
    assert_eq!(qbittorrent["attributes"]["id"]["computed"], true);
    assert!(body["resources"]["sonarr_host"].is_object());
    assert!(body["data_sources"]["sonarr_system_status"].is_object());
}

#[tokio::test]
async fn test_configure_rejects_half_configured_provider() {
    let fixture = TestFixture::unconfigured();
    let response = fixture
        .post(
            "/v1/configure",
            json!({"config": {"url": "http://sonarr:8989", "api_key": ""}}),
        )
        .await;

    // An empty api_key only passes when the environment supplies one.
    if std::env::var("SONARR_API_KEY").is_err() {
        assert_status!(response, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["diagnostics"][0]["summary"],
            "Invalid Provider Configuration"
        );
    }
}

#[tokio::test]
async fn test_configure_rejects_bad_url() {
    let fixture = TestFixture::unconfigured();
    let response = fixture
        .post(
            "/v1/configure",
            json!({"config": {"url": "sonarr:8989", "api_key": "k"}}),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["diagnostics"][0]["attribute"], "url");
}

#[tokio::test]
async fn test_configure_hides_api_key() {
    let fixture = TestFixture::unconfigured();
    let response = fixture
        .post(
            "/v1/configure",
            json!({"config": {"url": "http://sonarr:8989", "api_key": "secret-key"}}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["settings"]["url"], "http://sonarr:8989");
    assert_eq!(response.body["settings"]["api_key_configured"], true);
    assert!(!response.body.to_string().contains("secret-key"));

    let health = fixture.get("/health").await;
    assert_eq!(health.body["configured"], true);
}

// =============================================================================
// Resource lifecycle
// =============================================================================

#[tokio::test]
async fn test_validate_reports_attribute() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource(
            "sonarr_notification_webhook",
            "validate",
            json!({"config": {"name": "hook", "url": "https://example.com", "method": 3}}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["diagnostics"][0]["attribute"], "method");
}

#[tokio::test]
async fn test_plan_marks_computed_unknown() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource(
            "sonarr_tag",
            "plan",
            json!({"config": {"label": "hd"}}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["state"]["label"], "hd");
    assert_eq!(response.body["unknown"], json!(["id"]));
}

#[tokio::test]
async fn test_plan_reports_replacement() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource(
            "sonarr_root_folder",
            "plan",
            json!({
                "config": {"path": "/tv2"},
                "prior_state": {"id": 1, "path": "/tv", "accessible": true}
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["requires_replace"], json!(["path"]));
}

#[tokio::test]
async fn test_plan_rejects_invalid_config() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource("sonarr_tag", "plan", json!({"config": {}}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["diagnostics"][0]["attribute"], "label");
}

#[tokio::test]
async fn test_create_read_update_delete() {
    let fixture = TestFixture::new();

    let created = fixture
        .resource(
            "sonarr_download_client_transmission",
            "create",
            json!({
                "planned_state": {
                    "name": "tx",
                    "host": "transmission",
                    "port": 9091,
                    "password": "hunter2"
                }
            }),
        )
        .await;
    assert_status!(created, StatusCode::OK);
    let state = created.body["state"].clone();
    assert_eq!(state["password"], "hunter2");
    let id = state["id"].as_i64().unwrap();

    let read = fixture
        .resource(
            "sonarr_download_client_transmission",
            "read",
            json!({"state": state}),
        )
        .await;
    assert_status!(read, StatusCode::OK);
    assert_eq!(read.body["state"], state);

    let mut planned = state.clone();
    planned["port"] = json!(9092);
    let updated = fixture
        .resource(
            "sonarr_download_client_transmission",
            "update",
            json!({"planned_state": planned, "prior_state": state}),
        )
        .await;
    assert_status!(updated, StatusCode::OK);
    assert_eq!(updated.body["state"]["port"], 9092);
    assert_eq!(updated.body["state"]["password"], "hunter2");

    let deleted = fixture
        .resource(
            "sonarr_download_client_transmission",
            "delete",
            json!({"state": updated.body["state"]}),
        )
        .await;
    assert_status!(deleted, StatusCode::OK);
    assert!(fixture
        .sonarr
        .object(Endpoint::DownloadClient, id)
        .await
        .is_none());
}

#[tokio::test]
async fn test_read_of_removed_object() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource(
            "sonarr_tag",
            "read",
            json!({"state": {"id": 404, "label": "gone"}}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["removed"], true);
    assert!(response.body.get("state").is_none());
}

#[tokio::test]
async fn test_import_then_read() {
    let fixture = TestFixture::new();
    fixture
        .sonarr
        .insert(Endpoint::Tag, json!({"id": 42, "label": "imported"}))
        .await;

    let imported = fixture
        .resource("sonarr_tag", "import", json!({"id": "42"}))
        .await;
    assert_status!(imported, StatusCode::OK);
    assert_eq!(imported.body["state"]["id"], 42);

    let read = fixture
        .resource(
            "sonarr_tag",
            "read",
            json!({"state": imported.body["state"]}),
        )
        .await;
    assert_eq!(read.body["state"]["label"], "imported");

    let bad = fixture
        .resource("sonarr_tag", "import", json!({"id": "not-a-number"}))
        .await;
    assert_status!(bad, StatusCode::BAD_REQUEST);
    assert_eq!(
        bad.body["diagnostics"][0]["summary"],
        "Unexpected Import Identifier"
    );
}

#[tokio::test]
async fn test_client_error_surfaces_as_diagnostic() {
    let fixture = TestFixture::new();
    fixture.sonarr.set_unauthorized(true).await;

    let response = fixture
        .resource(
            "sonarr_tag",
            "create",
            json!({"planned_state": {"label": "x"}, "unknown": ["id"]}),
        )
        .await;

    assert_status!(response, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["diagnostics"][0]["summary"], "Client Error");
}

#[tokio::test]
async fn test_unconfigured_provider() {
    let fixture = TestFixture::unconfigured();
    let response = fixture
        .resource(
            "sonarr_tag",
            "create",
            json!({"planned_state": {"label": "x"}}),
        )
        .await;

    assert_status!(response, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        response.body["diagnostics"][0]["summary"],
        "Unconfigured Client"
    );
}

#[tokio::test]
async fn test_unknown_type_and_operation() {
    let fixture = TestFixture::new();

    let response = fixture
        .resource("sonarr_movie", "create", json!({}))
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = fixture
        .resource("sonarr_tag", "destroy", json!({}))
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_provider_category_sent_with_force_save() {
    let fixture = TestFixture::new();
    let response = fixture
        .resource(
            "sonarr_indexer_newznab",
            "create",
            json!({
                "planned_state": {
                    "name": "newznab",
                    "base_url": "https://lolo.sickbeard.com",
                    "api_path": "/api",
                    "categories": [5030, 5040]
                }
            }),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    let posts = fixture.sonarr.requests_with(Method::Post).await;
    assert_eq!(posts[0].query_param("forceSave"), Some("true"));
    assert_eq!(response.body["state"]["categories"], json!([5030, 5040]));
}

// =============================================================================
// Data sources
// =============================================================================

#[tokio::test]
async fn test_data_source_read() {
    let fixture = TestFixture::new();
    fixture
        .sonarr
        .insert(Endpoint::Tag, json!({"label": "hd"}))
        .await;

    let response = fixture
        .post(
            "/v1/data-sources/sonarr_tag/read",
            json!({"config": {"label": "hd"}}),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["state"]["id"], 1);

    let status = fixture
        .post("/v1/data-sources/sonarr_system_status/read", json!({}))
        .await;
    assert_status!(status, StatusCode::OK);
    assert_eq!(status.body["state"]["app_name"], "Sonarr");
}

#[tokio::test]
async fn test_data_source_requires_key() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/v1/data-sources/sonarr_series/read", json!({"config": {}}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["diagnostics"][0]["attribute"], "title");
}
