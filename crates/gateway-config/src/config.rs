//! Configuration types.

use crate::error::ConfigError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

/// Root gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Provider used when the caller gives no hint
    #[serde(default = "default_provider_id")]
    pub default_provider: String,

    /// Global request defaults
    #[serde(default)]
    pub defaults: RequestDefaults,

    /// Provider configurations keyed by provider id
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
            default_provider: default_provider_id(),
            defaults: RequestDefaults::default(),
            providers: BTreeMap::new(),
        }
    }
}

impl GatewayConfig {
    /// Add or replace a provider configuration
    #[must_use]
    pub fn with_provider(mut self, id: impl Into<String>, provider: ProviderConfig) -> Self {
        self.providers.insert(id.into(), provider);
        self
    }

    /// Set the default provider id
    #[must_use]
    pub fn with_default_provider(mut self, id: impl Into<String>) -> Self {
        self.default_provider = id.into();
        self
    }

    /// Set the global request defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validate the configuration.
    ///
    /// Enabled providers missing a base URL or credential are reported as
    /// warnings only; they load but are never routed to.
    ///
    /// # Errors
    /// Returns the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::invalid(
                "default_provider",
                "must not be blank",
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must not be 0"));
        }

        self.defaults.validate()?;

        for (id, provider) in &self.providers {
            if id.trim().is_empty() {
                return Err(ConfigError::invalid("providers", "provider id must not be blank"));
            }
            provider.validate(id)?;

            if provider.enabled && !provider.has_base_url() {
                warn!(provider = %id, "Provider is enabled but has no base_url");
            }
            if provider.enabled && !provider.has_credential() {
                warn!(provider = %id, "Provider is enabled but has no api_key");
            }
        }

        if !self.providers.contains_key(&self.default_provider) {
            warn!(
                provider = %self.default_provider,
                "Default provider has no configuration"
            );
        }

        Ok(())
    }
}

fn default_provider_id() -> String {
    "openai".to_string()
}

/// Global defaults applied when the caller omits a value
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestDefaults {
    /// Default max_tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Default stream flag
    #[serde(default)]
    pub stream: bool,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            stream: false,
        }
    }
}

impl RequestDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("defaults.max_tokens", "must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                "defaults.temperature",
                format!("must be between 0.0 and 2.0, got {}", self.temperature),
            ));
        }
        Ok(())
    }
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f64 {
    0.7
}

/// Connection settings for one provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Whether the provider may be routed to
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the OpenAI-compatible API (e.g. `https://api.openai.com/v1`)
    #[serde(default)]
    pub base_url: String,

    /// Credential sent with every request
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Model used when the caller does not name one
    #[serde(default)]
    pub default_model: Option<String>,

    /// Request timeout
    #[serde(default = "default_provider_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: None,
            default_model: None,
            timeout: default_provider_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Create an enabled provider configuration
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            enabled: true,
            base_url: base_url.into(),
            api_key: Some(SecretString::new(api_key.into())),
            ..Self::default()
        }
    }

    /// Set the enabled flag
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposed credential value
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }

    /// Whether a non-blank base URL is configured
    #[must_use]
    pub fn has_base_url(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Whether a non-blank credential is configured
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key().is_some_and(|key| !key.trim().is_empty())
    }

    /// Default model, if it is not blank
    #[must_use]
    pub fn default_model(&self) -> Option<&str> {
        self.default_model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
    }

    /// Chat completions endpoint for this provider
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn validate(&self, id: &str) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid(
                format!("providers.{id}.timeout"),
                "must be greater than 0",
            ));
        }

        if self.has_base_url() {
            url::Url::parse(self.base_url.trim()).map_err(|e| {
                ConfigError::invalid(format!("providers.{id}.base_url"), e.to_string())
            })?;
        }

        Ok(())
    }
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(30)
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
