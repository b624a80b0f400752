//! Common test utilities for exercising the host channel in-process.
//!
//! The fixture builds the router around a provider whose client talks to
//! an in-memory Sonarr, so every route can be driven end to end without
//! a running service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use sonarr_provider_core::{testing::MockSonarr, SonarrProvider};
use sonarr_provider_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use sonarr_provider_core::testing::fixtures;

/// In-process server wired to a mock Sonarr.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_create_tag() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/v1/resources/sonarr_tag/create", json!({
///         "planned_state": { "label": "hd" },
///         "unknown": ["id"]
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    pub router: Router,
    /// Mock service behind the provider
    pub sonarr: MockSonarr,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture whose provider is already configured against the mock.
    pub fn new() -> Self {
        let sonarr = MockSonarr::new();
        let provider = SonarrProvider::new();
        provider
            .configure_with(Some(sonarr.client()))
            .expect("Failed to configure provider");
        Self::with_provider(provider, sonarr)
    }

    /// Fixture whose provider has not been configured.
    #[allow(dead_code)]
    pub fn unconfigured() -> Self {
        Self::with_provider(SonarrProvider::new(), MockSonarr::new())
    }

    fn with_provider(provider: SonarrProvider, sonarr: MockSonarr) -> Self {
        let state = Arc::new(AppState::new(provider));
        Self {
            router: create_router(state),
            sonarr,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// POST to a resource operation.
    #[allow(dead_code)]
    pub async fn resource(&self, type_name: &str, operation: &str, body: Value) -> TestResponse {
        self.post(&format!("/v1/resources/{}/{}", type_name, operation), body)
            .await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
