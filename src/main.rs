//! # LLM Provider Gateway
//!
//! OpenAI-compatible chat completion gateway that routes each request to one
//! of several configured LLM providers.
//!
//! ## Usage
//!
//! ```bash
//! # Start with a configuration file that declares the providers
//! GATEWAY_CONFIG=/etc/gateway/config.yaml llm-provider-gateway
//!
//! # Supply credentials for declared providers that have no api_key
//! GATEWAY_CONFIG=/etc/gateway/config.yaml OPENAI_API_KEY=sk-... llm-provider-gateway
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 llm-provider-gateway
//! ```

use gateway_config::{load_config, GatewayConfig};
use gateway_providers::ReqwestTransport;
use gateway_routing::GatewayRouter;
use gateway_server::{AppState, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig, Metrics, MetricsConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application entry point
#[tokio::main]
async fn main() {
    // Logging settings come from the configuration, so load it first
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&logging_config(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting LLM Provider Gateway"
    );

    if let Err(e) = run(config).await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        default_provider = %config.default_provider,
        "Configuration loaded"
    );

    let metrics = Metrics::new(&MetricsConfig::default())?;
    let transport = ReqwestTransport::new()?;
    let router = GatewayRouter::new(&config, Arc::new(transport));

    let available = router.list_available();
    if available.is_empty() {
        warn!("No providers enabled, every chat request will be rejected");
    } else {
        info!(providers = ?available, "Providers enabled");
    }
    if !router.is_available(&config.default_provider) {
        warn!(
            provider = %config.default_provider,
            "Default provider is not available"
        );
    }

    let state = AppState::new(Arc::new(router), Arc::new(metrics));
    let server = Server::new(server_config(&config), state);

    server.run().await?;

    Ok(())
}

fn logging_config(config: &GatewayConfig) -> LoggingConfig {
    LoggingConfig::new()
        .with_level(config.logging.level.clone())
        .with_json(config.logging.json)
}

fn server_config(config: &GatewayConfig) -> ServerConfig {
    ServerConfig::new()
        .with_host(config.server.host.clone())
        .with_port(config.server.port)
}
