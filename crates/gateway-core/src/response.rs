//! Response types for the gateway.
//!
//! Responses are passed through from the provider as-is; only `provider`
//! is filled in by the gateway. Every provider-supplied field is lenient so
//! partial bodies still decode.

use crate::request::MessageRole;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat completion response (OpenAI compatible)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response id assigned by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Object type (e.g. "chat.completion")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// Creation timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Model that produced the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Provider that served the request, stamped by the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Completion choices
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// System fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// A completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Generated message
    #[serde(default)]
    pub message: ResponseMessage,

    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    /// Log probabilities, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<serde_json::Value>,
}

/// Message generated by the provider.
///
/// `content` is null for tool-call completions; `tool_calls` is passed
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role of the author, normally assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,

    /// Generated text
    #[serde(default)]
    pub content: Option<String>,

    /// Optional name of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}
