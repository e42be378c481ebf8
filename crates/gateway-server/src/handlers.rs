//! HTTP request handlers for the gateway API.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use gateway_core::{ChatRequest, ChatResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Query parameters accepted by the chat completion endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ProviderQuery {
    /// Provider hint; takes precedence over the body's `provider` field
    pub provider: Option<String>,
}

/// Provider availability response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Provider id
    pub provider: String,
    /// Whether requests can be routed to it
    pub available: bool,
}

/// Health check response: `{"status", "availableProviders", "providers"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "UP" when at least one provider is enabled, else "DOWN"
    pub status: String,
    /// Number of enabled providers
    pub available_providers: usize,
    /// Enabled provider ids
    pub providers: Vec<String>,
}

/// Chat completion endpoint
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn chat_completion(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Query(query): Query<ProviderQuery>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if let Err(error) = request.validate_request() {
        state.metrics.record_error(error.provider(), error.kind());
        return Err(error.into());
    }

    let hint = query
        .provider
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| request.provider_hint());
    let provider = state.router.registry().resolve(hint);

    debug!(
        provider = %provider,
        model = request.model.as_deref().unwrap_or_default(),
        messages = request.messages.len(),
        "Processing chat completion request"
    );

    let start = Instant::now();
    let result = state.router.route(&request, Some(&provider)).await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => {
            state.metrics.record_request(&provider, 200, elapsed);
            Ok(Json(response))
        }
        Err(error) => {
            state
                .metrics
                .record_request(&provider, error.status_code(), elapsed);
            state.metrics.record_error(&provider, error.kind());
            Err(error.into())
        }
    }
}

/// List enabled providers
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.router.list_available())
}

/// Availability of a single provider
pub async fn provider_status(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Json<ProviderStatus> {
    let available = state.router.is_available(&provider);
    Json(ProviderStatus {
        provider,
        available,
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers = state.router.list_available();
    let status = if providers.is_empty() { "DOWN" } else { "UP" };

    Json(HealthResponse {
        status: status.to_string(),
        available_providers: providers.len(),
        providers,
    })
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_endpoint(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let metrics = state
        .metrics
        .gather()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    ))
}
