//! # Gateway Config
//!
//! Configuration management for the LLM Provider Gateway.
//!
//! Configuration is loaded once at startup from a YAML, TOML or JSON file,
//! adjusted by environment overrides, validated, and then treated as an
//! immutable snapshot by the rest of the gateway.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod loader;

pub use config::{
    GatewayConfig, LoggingSettings, ProviderConfig, RequestDefaults, ServerSettings,
};
pub use error::ConfigError;
pub use loader::{load_config, ConfigFormat, ConfigLoader};
