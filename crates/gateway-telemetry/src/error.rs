//! Telemetry errors.

use thiserror::Error;

/// Errors raised while setting up logging or metrics
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Logging could not be initialized
    #[error("Failed to initialize logging: {0}")]
    Init(String),

    /// A metric could not be created or registered
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Metrics could not be encoded
    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}
