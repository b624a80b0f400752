//! Wire types of the host channel.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::{CancellationToken, DropGuard};

use sonarr_provider_core::{Diagnostic, Object, ProviderError, RequestContext};

// ============================================================================
// Request/Response types
// ============================================================================

/// Body of every resource, data source and configure call. Each operation
/// reads the members it needs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OperationRequest {
    pub config: Map<String, Value>,
    pub planned_state: Map<String, Value>,
    pub prior_state: Option<Map<String, Value>>,
    pub state: Map<String, Value>,
    /// Attributes the host marks as not yet known.
    pub unknown: Vec<String>,
    /// Import identifier.
    pub id: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl OperationRequest {
    pub fn config(&self) -> Object {
        Object::from_json(&self.config, &self.unknown)
    }

    pub fn planned_state(&self) -> Object {
        Object::from_json(&self.planned_state, &self.unknown)
    }

    pub fn prior_state(&self) -> Option<Object> {
        self.prior_state.as_ref().map(|s| Object::from_json(s, &[]))
    }

    pub fn state(&self) -> Object {
        Object::from_json(&self.state, &[])
    }

    /// Context for the SDK calls of this request. The token fires when the
    /// returned guard drops, so an abandoned HTTP request cancels its
    /// in-flight service calls.
    pub fn context(&self) -> (RequestContext, DropGuard) {
        let token = CancellationToken::new();
        let mut ctx = RequestContext::with_cancellation(token.clone());
        if let Some(ms) = self.timeout_ms {
            ctx = ctx.with_timeout(Duration::from_millis(ms));
        }
        (ctx, token.drop_guard())
    }
}

#[derive(Debug, Default, Serialize)]
pub struct OperationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// The remote object is gone; drop it from state.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub removed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_replace: Vec<String>,
}

impl OperationResponse {
    pub fn with_state(state: &Object) -> Self {
        Self {
            state: Some(state.to_json()),
            unknown: state.unknown_names(),
            ..Default::default()
        }
    }

    pub fn removed() -> Self {
        Self {
            removed: true,
            ..Default::default()
        }
    }

    pub fn diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Default::default()
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    diagnostics: Vec<Diagnostic>,
}

impl ApiError {
    pub fn new(status: StatusCode, summary: &str, detail: impl Into<String>) -> Self {
        Self {
            status,
            diagnostics: vec![Diagnostic::error(summary, detail)],
        }
    }

    pub fn unknown_type(kind: &str, type_name: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Unknown Type",
            format!("no {} named {}", kind, type_name),
        )
    }

    pub fn invalid(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            diagnostics,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match &err {
            ProviderError::InvalidConfiguration(_)
            | ProviderError::Translation(_)
            | ProviderError::UnexpectedImportIdentifier(_) => StatusCode::BAD_REQUEST,
            ProviderError::NotFound(_) => StatusCode::NOT_FOUND,
            ProviderError::Unconfigured(_) => StatusCode::PRECONDITION_FAILED,
            ProviderError::Client { .. } => StatusCode::BAD_GATEWAY,
            ProviderError::Unsupported(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProviderError::UnexpectedConfigureType(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            diagnostics: err.diagnostics(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(OperationResponse::diagnostics(self.diagnostics)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonarr_provider_core::Value;

    #[test]
    fn test_unknown_names_become_unknown_values() {
        let request: OperationRequest = serde_json::from_value(serde_json::json!({
            "planned_state": {"label": "hd", "id": null},
            "unknown": ["id"]
        }))
        .unwrap();
        let planned = request.planned_state();
        assert_eq!(planned.get("label"), &Value::from("hd"));
        assert!(planned.get("id").is_unknown());
    }

    #[test]
    fn test_removed_response_omits_state() {
        let json = serde_json::to_value(OperationResponse::removed()).unwrap();
        assert_eq!(json["removed"], true);
        assert!(json.get("state").is_none());
    }

    #[test]
    fn test_timeout_sets_deadline() {
        let request = OperationRequest {
            timeout_ms: Some(500),
            ..Default::default()
        };
        let (ctx, guard) = request.context();
        assert!(ctx.deadline().is_some());
        drop(guard);
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_client_error_maps_to_bad_gateway() {
        let err = ProviderError::client(
            "sonarr_tag",
            "read",
            sonarr_provider_core::ClientError::Status {
                status: 500,
                message: "boom".to_string(),
            },
        );
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.diagnostics[0].summary, "Client Error");
    }
}
