//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file extension is not recognized
    #[error("Unsupported configuration format: '{0}' (expected yaml, yml, toml or json)")]
    UnsupportedFormat(String),

    /// Configuration content could not be parsed
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Format that was being parsed
        format: &'static str,
        /// Parser error message
        message: String,
    },

    /// A value is out of range or malformed
    #[error("Invalid configuration value for '{field}': {message}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
