//! Prometheus metrics.
//!
//! Each [`Metrics`] owns its own registry, so several instances (for example
//! one per test) never collide.

use crate::error::TelemetryError;
use gateway_core::GatewayErrorKind;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Metrics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Prefix for every metric name
    pub namespace: String,
    /// Histogram buckets for request duration, in seconds
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: "gateway".to_string(),
            duration_buckets: vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
        }
    }
}

impl MetricsConfig {
    /// Set the namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Gateway request metrics
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    errors_total: IntCounterVec,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

impl Metrics {
    /// Create and register all metrics
    ///
    /// # Errors
    /// Returns error if a metric cannot be created or registered
    pub fn new(config: &MetricsConfig) -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("requests_total", "Chat completion requests by provider and status")
                .namespace(config.namespace.clone()),
            &["provider", "status"],
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "request_duration_seconds",
                "Chat completion latency by provider",
            )
            .namespace(config.namespace.clone())
            .buckets(config.duration_buckets.clone()),
            &["provider"],
        )?;

        let errors_total = IntCounterVec::new(
            Opts::new("errors_total", "Failed chat completion requests by provider and kind")
                .namespace(config.namespace.clone()),
            &["provider", "kind"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
            errors_total,
        })
    }

    /// Record a completed request
    pub fn record_request(&self, provider: &str, status: u16, duration: Duration) {
        self.requests_total
            .with_label_values(&[provider, &status.to_string()])
            .inc();
        self.request_duration
            .with_label_values(&[provider])
            .observe(duration.as_secs_f64());
    }

    /// Record a failed request
    pub fn record_error(&self, provider: &str, kind: GatewayErrorKind) {
        self.errors_total
            .with_label_values(&[provider, kind.as_str()])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    ///
    /// # Errors
    /// Returns error if encoding fails
    pub fn gather(&self) -> Result<String, TelemetryError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| TelemetryError::Encode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Encode(e.to_string()))
    }

    /// Underlying registry
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
