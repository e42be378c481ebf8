//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level when it is set.

use crate::error::TelemetryError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level filter used when `RUST_LOG` is not set (e.g. "info", "gateway_routing=debug")
    pub level: String,
    /// Emit one JSON object per line instead of human-readable text
    pub json: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level filter
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable or disable JSON output
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Enable or disable the event target
    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    fn filter(&self) -> Result<EnvFilter, TelemetryError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| TelemetryError::Init(format!("invalid log level '{}': {e}", self.level))),
        }
    }
}

/// Install the global tracing subscriber
///
/// # Errors
/// Returns error if the level is not a valid filter or a subscriber is
/// already installed
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = config.filter()?;

    let layer = if config.json {
        fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}
