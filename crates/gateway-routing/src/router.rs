//! Gateway router.
//!
//! Routes one request to exactly one provider:
//! resolve the provider id, check availability, adapt the request, build the
//! headers, dispatch with a timeout and normalize the outcome.

use gateway_config::GatewayConfig;
use gateway_core::{ChatRequest, ChatResponse, GatewayError, GatewayResult};
use gateway_providers::{
    HeaderBuilder, ProviderRegistry, RequestAdapter, RequestExtension, Transport,
    TransportError, TransportRequest, TransportResponse,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Routes chat requests to configured providers
pub struct GatewayRouter {
    registry: ProviderRegistry,
    adapter: RequestAdapter,
    headers: HeaderBuilder,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for GatewayRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayRouter")
            .field("registry", &self.registry)
            .field("adapter", &self.adapter)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl GatewayRouter {
    /// Create a router with the built-in adapter and header tables
    #[must_use]
    pub fn new(config: &GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry: ProviderRegistry::from_config(config),
            adapter: RequestAdapter::new(config.defaults.clone()),
            headers: HeaderBuilder::default(),
            transport,
        }
    }

    /// Create a builder
    #[must_use]
    pub fn builder(config: &GatewayConfig) -> GatewayRouterBuilder {
        GatewayRouterBuilder::new(config)
    }

    /// Provider registry
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Whether a provider can be routed to
    #[must_use]
    pub fn is_available(&self, provider_id: &str) -> bool {
        self.registry.is_available(provider_id)
    }

    /// Ids of every enabled provider
    #[must_use]
    pub fn list_available(&self) -> Vec<String> {
        self.registry.list_available()
    }

    /// Route a request to the hinted provider, or the default one
    ///
    /// # Errors
    /// Returns a normalized [`GatewayError`] for unavailable providers,
    /// unresolvable models, backend error statuses, timeouts and transport
    /// failures
    #[instrument(skip(self, request), fields(provider = tracing::field::Empty))]
    pub async fn route(
        &self,
        request: &ChatRequest,
        provider_hint: Option<&str>,
    ) -> GatewayResult<ChatResponse> {
        let provider_id = self.registry.resolve(provider_hint);
        tracing::Span::current().record("provider", provider_id.as_str());

        let started = Instant::now();
        let result = self.dispatch(request, &provider_id).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => debug!(
                provider = %provider_id,
                model = response.model.as_deref().unwrap_or_default(),
                elapsed_ms,
                "Request routed"
            ),
            Err(error) => warn!(
                provider = %provider_id,
                kind = %error.kind(),
                status = error.status_code(),
                elapsed_ms,
                error = %error,
                "Request failed"
            ),
        }

        result
    }

    async fn dispatch(
        &self,
        request: &ChatRequest,
        provider_id: &str,
    ) -> GatewayResult<ChatResponse> {
        let config = match self.registry.config_for(provider_id) {
            Some(config) if self.registry.is_available(provider_id) => config,
            _ => return Err(GatewayError::provider_unavailable(provider_id)),
        };

        let effective = self.adapter.adapt(request, config, provider_id)?;
        let headers = self
            .headers
            .build(provider_id, config.api_key().unwrap_or_default())?;
        let body = effective
            .to_body()
            .map_err(|e| GatewayError::unexpected(provider_id, e))?;

        let outgoing =
            TransportRequest::post(config.completions_url(), headers, body, config.timeout);

        let response = match tokio::time::timeout(config.timeout, self.transport.send(outgoing))
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(TransportError::Timeout)) | Err(_) => {
                return Err(GatewayError::timeout(provider_id, config.timeout))
            }
            Ok(Err(error)) => return Err(GatewayError::unexpected(provider_id, error)),
        };

        normalize(provider_id, &response)
    }
}

fn normalize(provider_id: &str, response: &TransportResponse) -> GatewayResult<ChatResponse> {
    if !response.is_success() {
        return Err(GatewayError::provider_backend(
            provider_id,
            response.status,
            &response.text(),
        ));
    }

    let mut chat: ChatResponse = serde_json::from_slice(&response.body).map_err(|e| {
        GatewayError::unexpected(provider_id, format!("invalid provider response: {e}"))
    })?;
    chat.provider = Some(provider_id.to_string());
    Ok(chat)
}

/// Builder for [`GatewayRouter`]
pub struct GatewayRouterBuilder {
    registry: ProviderRegistry,
    adapter: RequestAdapter,
    headers: HeaderBuilder,
    transport: Option<Arc<dyn Transport>>,
}

impl GatewayRouterBuilder {
    /// Create a builder from the gateway configuration
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            registry: ProviderRegistry::from_config(config),
            adapter: RequestAdapter::new(config.defaults.clone()),
            headers: HeaderBuilder::default(),
            transport: None,
        }
    }

    /// Set the transport
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register a request extension on the adapter built from the
    /// configured defaults
    #[must_use]
    pub fn extension(
        mut self,
        provider_id: impl Into<String>,
        extension: impl RequestExtension + 'static,
    ) -> Self {
        self.adapter = self.adapter.with_extension(provider_id, extension);
        self
    }

    /// Replace the request adapter.
    ///
    /// The replacement carries its own defaults; build it with
    /// `RequestAdapter::new(config.defaults.clone())` to keep the configured
    /// ones, or use [`Self::extension`].
    #[must_use]
    pub fn adapter(mut self, adapter: RequestAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    /// Replace the header builder
    #[must_use]
    pub fn header_builder(mut self, headers: HeaderBuilder) -> Self {
        self.headers = headers;
        self
    }

    /// Build the router
    ///
    /// # Errors
    /// Returns a configuration error if no transport was set
    pub fn build(self) -> GatewayResult<GatewayRouter> {
        let transport = self
            .transport
            .ok_or_else(|| GatewayError::configuration("GatewayRouter requires a transport"))?;

        Ok(GatewayRouter {
            registry: self.registry,
            adapter: self.adapter,
            headers: self.headers,
            transport,
        })
    }
}
