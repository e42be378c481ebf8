//! Shared application state.

use gateway_routing::GatewayRouter;
use gateway_telemetry::Metrics;
use std::sync::Arc;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Request router
    pub router: Arc<GatewayRouter>,
    /// Request metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create application state
    #[must_use]
    pub fn new(router: Arc<GatewayRouter>, metrics: Arc<Metrics>) -> Self {
        Self { router, metrics }
    }
}
