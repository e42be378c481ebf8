//! HTTP server with graceful shutdown.

use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::{error::ServerError, routes::create_router, state::AppState};

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gateway HTTP server
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until Ctrl-C or SIGTERM
    ///
    /// # Errors
    /// Returns error if the address cannot be bound or serving fails
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    ///
    /// # Errors
    /// Returns error if serving fails
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!(address = %local, "Gateway listening");

        axum::serve(listener, create_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Gateway stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        "ctrl+c"
    };

    #[cfg(unix)]
    let sigterm = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
        "sigterm"
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<&str>();

    let signal_name = tokio::select! {
        name = ctrl_c => name,
        name = sigterm => name,
    };

    info!(signal = signal_name, "Received shutdown signal");
}
