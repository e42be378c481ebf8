//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use gateway_core::error::{CLIENT_SOURCE, SERVER_SOURCE};
use gateway_core::{GatewayError, GatewayErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every endpoint:
/// `{"message", "source", "statusCode", "timestamp"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message
    pub message: String,
    /// Originating provider id, or "validation" / "client" / "server"
    pub source: String,
    /// HTTP status code
    pub status_code: u16,
    /// When the error was raised
    pub timestamp: DateTime<Utc>,
}

/// Error returned from handlers and extractors
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Human-readable message
    pub message: String,
    /// Originating provider id, or a non-provider label
    pub provider: String,
    /// Error category
    pub kind: GatewayErrorKind,
    /// When the error was raised
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    fn new(
        status: StatusCode,
        kind: GatewayErrorKind,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            provider: provider.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Malformed client request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            GatewayErrorKind::Client,
            CLIENT_SOURCE,
            message,
        )
    }

    /// Gateway-internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            GatewayErrorKind::Unexpected,
            SERVER_SOURCE,
            message,
        )
    }

    /// Response body for this error
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.message.clone(),
            source: self.provider.clone(),
            status_code: self.status.as_u16(),
            timestamp: self.timestamp,
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self {
            status,
            message: error.message().to_string(),
            provider: error.provider().to_string(),
            kind: error.kind(),
            timestamp: error.timestamp(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Errors raised while running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an IO error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
