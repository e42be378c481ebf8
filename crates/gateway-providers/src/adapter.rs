//! Request adaptation.
//!
//! Turns a caller's [`ChatRequest`] into the [`EffectiveRequest`] sent to a
//! provider: the model is resolved against the provider default, sampling
//! parameters fall back to the global defaults, and provider-specific fields
//! are contributed by a [`RequestExtension`] registered for the provider id.

use gateway_config::{ProviderConfig, RequestDefaults};
use gateway_core::{ChatRequest, EffectiveRequest, GatewayError, ProviderKind};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Provider-specific additions to the outgoing request body
pub trait RequestExtension: Send + Sync {
    /// Fields merged into the top level of the JSON body.
    ///
    /// The caller's `additional_properties` are available on `request`; an
    /// extension decides which of them, if any, to forward.
    fn extension_fields(&self, request: &ChatRequest) -> Map<String, Value>;
}

/// Anthropic request extension.
///
/// Anthropic's OpenAI-compatible endpoint currently needs no extra fields, so
/// this contributes an empty map. It is registered so Anthropic requests
/// always carry an extension section.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicExtension;

impl RequestExtension for AnthropicExtension {
    fn extension_fields(&self, _request: &ChatRequest) -> Map<String, Value> {
        Map::new()
    }
}

/// Builds provider-ready requests
#[derive(Clone)]
pub struct RequestAdapter {
    defaults: RequestDefaults,
    extensions: HashMap<String, Arc<dyn RequestExtension>>,
}

impl std::fmt::Debug for RequestAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut extensions: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        f.debug_struct("RequestAdapter")
            .field("defaults", &self.defaults)
            .field("extensions", &extensions)
            .finish()
    }
}

impl Default for RequestAdapter {
    fn default() -> Self {
        Self::new(RequestDefaults::default())
    }
}

impl RequestAdapter {
    /// Create an adapter with the built-in extension table
    #[must_use]
    pub fn new(defaults: RequestDefaults) -> Self {
        let mut extensions: HashMap<String, Arc<dyn RequestExtension>> = HashMap::new();
        extensions.insert(
            ProviderKind::Anthropic.as_str().to_string(),
            Arc::new(AnthropicExtension),
        );

        Self {
            defaults,
            extensions,
        }
    }

    /// Register (or replace) the extension for a provider id
    #[must_use]
    pub fn with_extension(
        mut self,
        provider_id: impl Into<String>,
        extension: impl RequestExtension + 'static,
    ) -> Self {
        self.extensions.insert(provider_id.into(), Arc::new(extension));
        self
    }

    /// Global defaults in use
    #[must_use]
    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Merge a request with provider and global defaults
    ///
    /// # Errors
    /// Returns a validation error when neither the request nor the provider
    /// configuration names a model
    pub fn adapt(
        &self,
        request: &ChatRequest,
        config: &ProviderConfig,
        provider_id: &str,
    ) -> Result<EffectiveRequest, GatewayError> {
        let model = request
            .requested_model()
            .or_else(|| config.default_model())
            .ok_or_else(|| {
                GatewayError::invalid_for_provider(
                    provider_id,
                    format!(
                        "No model specified and provider '{provider_id}' has no default model"
                    ),
                )
            })?
            .to_string();

        let extensions = self
            .extensions
            .get(provider_id)
            .map(|extension| extension.extension_fields(request));

        trace!(
            provider = %provider_id,
            model = %model,
            has_extensions = extensions.is_some(),
            "Adapted request"
        );

        Ok(EffectiveRequest {
            model,
            messages: request.messages.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.defaults.max_tokens),
            temperature: request.temperature.unwrap_or(self.defaults.temperature),
            stream: request.stream.unwrap_or(self.defaults.stream),
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
            stop: request.stop.clone(),
            user: request.user.clone(),
            extensions,
        })
    }
}
