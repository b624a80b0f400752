use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{data_sources, handlers, resources};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/schema", get(handlers::get_schema))
        .route("/configure", post(handlers::configure))
        .route("/resources/{type_name}/{operation}", post(resources::dispatch))
        .route("/data-sources/{type_name}/read", post(data_sources::read))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}
