//! Normalized error type returned by the gateway.
//!
//! Every failure, whether it originates from caller input, configuration, or
//! a provider backend, is surfaced as a [`GatewayError`] carrying the
//! originating provider label, a numeric status code, a human-readable
//! message and the time it was raised.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Provider label used for caller input validation failures
pub const VALIDATION_SOURCE: &str = "validation";
/// Provider label used for malformed client requests
pub const CLIENT_SOURCE: &str = "client";
/// Provider label used for gateway-internal failures
pub const SERVER_SOURCE: &str = "server";

/// Category of a [`GatewayError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorKind {
    /// Caller supplied an invalid request
    Validation,
    /// Caller supplied a request body that could not be read
    Client,
    /// Provider is unknown, disabled, or missing connection details
    ProviderUnavailable,
    /// Provider backend answered with a non-success status
    ProviderBackend,
    /// Provider did not answer within its configured timeout
    Timeout,
    /// Any other transport or serialization failure
    Unexpected,
    /// Gateway configuration is invalid
    Configuration,
}

impl GatewayErrorKind {
    /// Stable snake_case name, used as a metrics label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Client => "client",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::ProviderBackend => "provider_backend",
            Self::Timeout => "timeout",
            Self::Unexpected => "unexpected",
            Self::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized gateway error
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayError {
    kind: GatewayErrorKind,
    message: String,
    provider: String,
    status_code: u16,
    timestamp: DateTime<Utc>,
}

impl GatewayError {
    /// Create an error with explicit fields
    #[must_use]
    pub fn new(
        kind: GatewayErrorKind,
        message: impl Into<String>,
        provider: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            provider: provider.into(),
            status_code,
            timestamp: Utc::now(),
        }
    }

    /// Caller input failed validation
    #[must_use]
    pub fn validation(details: impl std::fmt::Display) -> Self {
        Self::new(
            GatewayErrorKind::Validation,
            format!("Validation failed: {details}"),
            VALIDATION_SOURCE,
            400,
        )
    }

    /// Request could not be resolved against a provider (e.g. no model)
    #[must_use]
    pub fn invalid_for_provider(provider: &str, message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Validation, message, provider, 400)
    }

    /// Caller sent a body the gateway could not parse
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Client, message, CLIENT_SOURCE, 400)
    }

    /// Provider is unknown, disabled or incompletely configured
    #[must_use]
    pub fn provider_unavailable(provider: &str) -> Self {
        Self::new(
            GatewayErrorKind::ProviderUnavailable,
            format!("Provider '{provider}' is not available or not configured"),
            provider,
            400,
        )
    }

    /// Provider backend answered with an error status
    #[must_use]
    pub fn provider_backend(provider: &str, status_code: u16, body: &str) -> Self {
        Self::new(
            GatewayErrorKind::ProviderBackend,
            format!("Provider error: {body}"),
            provider,
            status_code,
        )
    }

    /// Provider did not answer in time
    #[must_use]
    pub fn timeout(provider: &str, timeout: Duration) -> Self {
        Self::new(
            GatewayErrorKind::Timeout,
            format!(
                "Provider '{provider}' did not respond within {}ms",
                timeout.as_millis()
            ),
            provider,
            504,
        )
    }

    /// Any other failure while talking to a provider
    #[must_use]
    pub fn unexpected(provider: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(
            GatewayErrorKind::Unexpected,
            format!("Unexpected error: {cause}"),
            provider,
            500,
        )
    }

    /// Gateway configuration is invalid
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Configuration, message, SERVER_SOURCE, 500)
    }

    /// Error category
    #[must_use]
    pub fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Originating provider id, or one of the non-provider labels
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Numeric HTTP-style status code
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// When the error was raised
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation(errors)
    }
}
