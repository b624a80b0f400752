use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use sonarr_provider_core::Diagnostic;

use super::types::{ApiError, OperationRequest, OperationResponse};
use crate::state::AppState;

/// POST /v1/data-sources/{type}/read
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(type_name): Path<String>,
    Json(request): Json<OperationRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let source = state
        .provider()
        .data_source(&type_name)
        .ok_or_else(|| ApiError::unknown_type("data source", &type_name))?;

    let config = request.config();
    let diagnostics = source.schema().validate(&config);
    if diagnostics.iter().any(Diagnostic::is_error) {
        return Err(ApiError::invalid(diagnostics));
    }

    let (ctx, _guard) = request.context();
    let object = source.read(&ctx, &config).await?;
    Ok(Json(OperationResponse::with_state(&object)))
}
