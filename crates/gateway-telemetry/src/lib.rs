//! # Gateway Telemetry
//!
//! Observability for the LLM Provider Gateway.
//!
//! This crate provides:
//! - Structured logging on top of `tracing-subscriber`
//! - Prometheus request, latency and error metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

// Re-export main types
pub use error::TelemetryError;
pub use logging::{init_logging, LoggingConfig};
pub use metrics::{Metrics, MetricsConfig};
