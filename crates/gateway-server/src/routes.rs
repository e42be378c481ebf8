//! Route definitions for the gateway API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Path prefix of the provider API
pub const API_PREFIX: &str = "/api/v1/llm";

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, llm_routes())
        // Metrics endpoint
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn llm_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/completions", post(handlers::chat_completion))
        .route("/providers", get(handlers::list_providers))
        .route("/providers/:provider/status", get(handlers::provider_status))
        .route("/health", get(handlers::health_check))
}
