//! Provider registry.
//!
//! Holds the immutable per-provider configuration snapshot and answers
//! availability queries for the router and the HTTP layer.

use gateway_config::{GatewayConfig, ProviderConfig};
use std::collections::BTreeMap;
use tracing::debug;

/// Registry of configured providers keyed by provider id
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
    default_provider: String,
}

impl ProviderRegistry {
    /// Create a registry from provider configurations and a default id
    #[must_use]
    pub fn new(
        providers: BTreeMap<String, ProviderConfig>,
        default_provider: impl Into<String>,
    ) -> Self {
        Self {
            providers,
            default_provider: default_provider.into(),
        }
    }

    /// Create a registry from the gateway configuration
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let registry = Self::new(config.providers.clone(), config.default_provider.clone());
        debug!(
            providers = registry.len(),
            default_provider = %registry.default_provider,
            "Provider registry built"
        );
        registry
    }

    /// Whether a provider can be routed to.
    ///
    /// True only for a known id whose configuration is enabled and has both a
    /// base URL and a credential.
    #[must_use]
    pub fn is_available(&self, provider_id: &str) -> bool {
        if provider_id.trim().is_empty() {
            return false;
        }

        self.providers.get(provider_id).is_some_and(|config| {
            config.enabled && config.has_base_url() && config.has_credential()
        })
    }

    /// Ids of every enabled provider, sorted.
    ///
    /// Only the enabled flag is consulted, so an enabled provider that is
    /// missing its base URL or credential is listed here while
    /// [`is_available`](Self::is_available) reports it unavailable.
    #[must_use]
    pub fn list_available(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|(_, config)| config.enabled)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Provider id to use for a request: the hint if non-blank, else the default
    #[must_use]
    pub fn resolve(&self, hint: Option<&str>) -> String {
        match hint {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => self.default_provider.clone(),
        }
    }

    /// Configuration for a provider
    #[must_use]
    pub fn config_for(&self, provider_id: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_id)
    }

    /// Default provider id
    #[must_use]
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Number of configured providers, enabled or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
