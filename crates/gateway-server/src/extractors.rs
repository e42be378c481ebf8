//! Custom Axum extractors for the gateway.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Request id from `x-request-id` / `x-correlation-id`, or a new UUID
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-request-id")
            .or_else(|| parts.headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

        Ok(Self(id))
    }
}

/// JSON body extractor whose failures become 400 "client" errors
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

        let value: T = serde_json::from_slice(&bytes).map_err(|e| {
            debug!(error = %e, "JSON parse error");
            ApiError::bad_request(format!("Invalid JSON: {e}"))
        })?;

        Ok(Self(value))
    }
}
