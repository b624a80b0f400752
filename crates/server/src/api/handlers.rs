use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use sonarr_provider_core::{Diagnostic, SanitizedSettings, Schema};

use super::types::{ApiError, OperationRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub configured: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        configured: state.settings().is_some(),
    })
}

#[derive(Serialize)]
pub struct SchemaResponse {
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}

/// GET /v1/schema
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let provider = state.provider();
    Json(SchemaResponse {
        provider: provider.schema(),
        resources: provider
            .resources()
            .map(|(name, r)| (name.to_string(), r.schema()))
            .collect(),
        data_sources: provider
            .data_sources()
            .map(|(name, d)| (name.to_string(), d.schema()))
            .collect(),
    })
}

#[derive(Serialize)]
pub struct ConfigureResponse {
    pub settings: SanitizedSettings,
    pub diagnostics: Vec<Diagnostic>,
}

/// POST /v1/configure
pub async fn configure(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OperationRequest>,
) -> Result<Json<ConfigureResponse>, ApiError> {
    let settings = state.provider().configure(&request.config())?;

    let mut diagnostics = Vec::new();
    if !settings.api_key_configured {
        diagnostics.push(Diagnostic::warning(
            "Unconfigured Client",
            "url and api_key are unset; resources cannot reach Sonarr until they are provided",
        ));
    }

    info!("provider configured for {:?}", settings.url);
    state.set_settings(settings.clone());
    Ok(Json(ConfigureResponse {
        settings,
        diagnostics,
    }))
}
