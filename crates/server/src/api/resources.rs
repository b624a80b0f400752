//! Resource lifecycle handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use sonarr_provider_core::{Diagnostic, Resource};

use super::types::{ApiError, OperationRequest, OperationResponse};
use crate::state::AppState;

/// POST /v1/resources/{type}/{operation}
///
/// `operation` is one of validate, plan, create, read, update, delete or
/// import.
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Path((type_name, operation)): Path<(String, String)>,
    Json(request): Json<OperationRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let resource = state
        .provider()
        .resource(&type_name)
        .ok_or_else(|| ApiError::unknown_type("resource", &type_name))?;
    debug!("{} {}", operation, type_name);

    let response = match operation.as_str() {
        "validate" => validate(resource.as_ref(), &request),
        "plan" => plan(resource.as_ref(), &request)?,
        "create" => create(resource.as_ref(), &request).await?,
        "read" => read(resource.as_ref(), &request).await?,
        "update" => update(resource.as_ref(), &request).await?,
        "delete" => delete(resource.as_ref(), &request).await?,
        "import" => import(resource.as_ref(), &request).await?,
        other => {
            return Err(ApiError::new(
                StatusCode::NOT_FOUND,
                "Unknown Operation",
                format!("resources do not support {}", other),
            ))
        }
    };
    Ok(Json(response))
}

fn validate(resource: &dyn Resource, request: &OperationRequest) -> OperationResponse {
    OperationResponse::diagnostics(resource.schema().validate(&request.config()))
}

fn plan(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let schema = resource.schema();
    let config = request.config();
    let diagnostics = schema.validate(&config);
    if diagnostics.iter().any(Diagnostic::is_error) {
        return Err(ApiError::invalid(diagnostics));
    }

    let prior = request.prior_state();
    let plan = schema.plan(&config, prior.as_ref());
    Ok(OperationResponse {
        requires_replace: plan.requires_replace.clone(),
        diagnostics,
        ..OperationResponse::with_state(&plan.state)
    })
}

async fn create(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let (ctx, _guard) = request.context();
    let state = resource.create(&ctx, &request.planned_state()).await?;
    Ok(OperationResponse::with_state(&state))
}

async fn read(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let (ctx, _guard) = request.context();
    Ok(match resource.read(&ctx, &request.state()).await? {
        Some(state) => OperationResponse::with_state(&state),
        None => OperationResponse::removed(),
    })
}

async fn update(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let prior = request.prior_state().ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Missing Prior State",
            "update requires prior_state",
        )
    })?;
    let (ctx, _guard) = request.context();
    let state = resource
        .update(&ctx, &request.planned_state(), &prior)
        .await?;
    Ok(OperationResponse::with_state(&state))
}

async fn delete(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let (ctx, _guard) = request.context();
    resource.delete(&ctx, &request.state()).await?;
    Ok(OperationResponse::default())
}

async fn import(
    resource: &dyn Resource,
    request: &OperationRequest,
) -> Result<OperationResponse, ApiError> {
    let id = request.id.as_deref().ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Missing Import Identifier",
            "import requires id",
        )
    })?;
    let (ctx, _guard) = request.context();
    let state = resource.import_state(&ctx, id).await?;
    Ok(OperationResponse::with_state(&state))
}
