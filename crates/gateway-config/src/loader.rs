//! Configuration loading from files and the environment.

use crate::config::GatewayConfig;
use crate::error::ConfigError;
use secrecy::SecretString;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// TOML (`.toml`)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    /// Returns error if the extension is missing or unsupported
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Format name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Builder-style configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<String>,
    env_overrides: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with environment overrides enabled and no file
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            env_overrides: true,
        }
    }

    /// Load from the given file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Enable or disable environment overrides
    #[must_use]
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    /// Load, override and validate the configuration
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or a value is invalid
    pub async fn load(&self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.file {
            Some(path) => {
                let format = ConfigFormat::from_path(path)?;
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Io {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path, format = format.name(), "Read configuration file");
                Self::parse_str(&content, format)?
            }
            None => GatewayConfig::default(),
        };

        if self.env_overrides {
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        }

        config.validate()?;

        info!(
            providers = config.providers.len(),
            default_provider = %config.default_provider,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Parse configuration content without touching the environment
    ///
    /// # Errors
    /// Returns error if the content is not valid for the format
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<GatewayConfig, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            format: format.name(),
            message,
        };

        match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }
}

/// Load configuration from the file named by `GATEWAY_CONFIG`, or defaults
///
/// # Errors
/// Returns error if the configuration cannot be loaded
pub async fn load_config() -> Result<GatewayConfig, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        loader = loader.with_file(path);
    }
    loader.load().await
}

/// Environment variable holding the credential for a provider id
#[must_use]
pub fn api_key_env_var(provider_id: &str) -> String {
    format!("{}_API_KEY", provider_id.to_ascii_uppercase().replace('-', "_"))
}

/// Apply environment overrides using the given lookup.
///
/// Recognized keys: `GATEWAY_HOST`, `GATEWAY_PORT`, `GATEWAY_DEFAULT_PROVIDER`,
/// `GATEWAY_LOG_LEVEL`, and `<PROVIDER>_API_KEY` for declared providers
/// without a credential. Providers are never created from the environment.
///
/// # Errors
/// Returns error if an override value cannot be parsed
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("GATEWAY_HOST") {
        config.server.host = host;
    }

    if let Some(port) = lookup("GATEWAY_PORT") {
        config.server.port = port
            .parse()
            .map_err(|e| ConfigError::invalid("GATEWAY_PORT", format!("{e}")))?;
    }

    if let Some(provider) = lookup("GATEWAY_DEFAULT_PROVIDER") {
        config.default_provider = provider;
    }

    if let Some(level) = lookup("GATEWAY_LOG_LEVEL") {
        config.logging.level = level;
    }

    for (id, provider) in &mut config.providers {
        if provider.has_credential() {
            continue;
        }
        let var = api_key_env_var(id);
        if let Some(key) = lookup(&var).filter(|key| !key.trim().is_empty()) {
            debug!(provider = %id, env = %var, "Using credential from environment");
            provider.api_key = Some(SecretString::new(key));
        }
    }

    Ok(())
}
