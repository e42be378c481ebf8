//! HTTP transport abstraction.
//!
//! The router talks to providers through [`Transport`] so tests can swap in
//! an in-process implementation. [`ReqwestTransport`] is the production one.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Outgoing provider request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body
    pub body: Value,
    /// Per-request timeout
    pub timeout: Duration,
}

impl TransportRequest {
    /// Create a JSON POST request
    #[must_use]
    pub fn post(url: impl Into<String>, headers: HeaderMap, body: Value, timeout: Duration) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers,
            body,
            timeout,
        }
    }
}

/// Raw provider response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response within the request timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

/// Sends provider requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response, whatever its status
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport sharing one connection pool
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Create a transport around an existing client
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        trace!(method = %request.method, url = %request.url, "Sending provider request");

        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(request.timeout)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(url = %request.url, status, bytes = body.len(), "Provider responded");

        Ok(TransportResponse { status, body })
    }
}
