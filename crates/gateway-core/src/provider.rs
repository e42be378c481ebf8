//! Well-known provider identifiers.

use serde::{Deserialize, Serialize};

/// Providers the gateway knows conventions for.
///
/// Providers are addressed by plain string ids in configuration; this enum
/// only names the ids that have dedicated header or request handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// OpenAI
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic
    #[serde(rename = "anthropic")]
    Anthropic,
    /// Ollama (self-hosted)
    #[serde(rename = "ollama")]
    Ollama,
    /// Azure OpenAI
    #[serde(rename = "azure-openai")]
    AzureOpenAI,
    /// Hugging Face inference endpoints
    #[serde(rename = "huggingface")]
    HuggingFace,
}

impl ProviderKind {
    /// All well-known providers
    pub const ALL: [Self; 5] = [
        Self::OpenAI,
        Self::Anthropic,
        Self::Ollama,
        Self::AzureOpenAI,
        Self::HuggingFace,
    ];

    /// Provider id as used in configuration
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
            Self::AzureOpenAI => "azure-openai",
            Self::HuggingFace => "huggingface",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
