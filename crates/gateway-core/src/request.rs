//! Request types for the gateway.
//!
//! [`ChatRequest`] is the caller-facing, OpenAI-compatible chat completion
//! request. [`EffectiveRequest`] is the same request after defaults and
//! provider quirks have been applied; it is what goes on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// Caller-facing chat completion request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// Conversation messages, oldest first
    #[serde(default)]
    #[validate(length(min = 1, message = "messages must not be empty"))]
    #[validate(nested)]
    pub messages: Vec<ChatMessage>,

    /// Target model; the provider's default model is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Request a streamed response from the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Provider hint carried in the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Top-p (nucleus sampling) parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Frequency penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,

    /// Presence penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,

    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// End-user identifier for abuse tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Additional provider-specific parameters
    #[serde(
        default,
        alias = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Map<String, Value>>,
}

impl ChatRequest {
    /// Create a request from a list of messages
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Create a new builder for `ChatRequest`
    #[must_use]
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Model requested by the caller, if it is not blank
    #[must_use]
    pub fn requested_model(&self) -> Option<&str> {
        non_blank(self.model.as_deref())
    }

    /// Provider hint carried in the body, if it is not blank
    #[must_use]
    pub fn provider_hint(&self) -> Option<&str> {
        non_blank(self.provider.as_deref())
    }

    /// Validate caller input
    ///
    /// # Errors
    /// Returns a validation error if messages are missing or malformed
    pub fn validate_request(&self) -> Result<(), crate::error::GatewayError> {
        self.validate().map_err(Into::into)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builder for `ChatRequest`
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    request: ChatRequest,
}

impl ChatRequestBuilder {
    /// Set the messages
    #[must_use]
    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.request.messages = messages;
        self
    }

    /// Add a message
    #[must_use]
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.request.messages.push(message);
        self
    }

    /// Set the model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.request.model = Some(model.into());
        self
    }

    /// Set max_tokens
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.request.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.request.temperature = Some(temperature);
        self
    }

    /// Set the stream flag
    #[must_use]
    pub fn stream(mut self, stream: bool) -> Self {
        self.request.stream = Some(stream);
        self
    }

    /// Set the provider hint
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.request.provider = Some(provider.into());
        self
    }

    /// Set top_p
    #[must_use]
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.request.top_p = Some(top_p);
        self
    }

    /// Set frequency_penalty
    #[must_use]
    pub fn frequency_penalty(mut self, frequency_penalty: f64) -> Self {
        self.request.frequency_penalty = Some(frequency_penalty);
        self
    }

    /// Set presence_penalty
    #[must_use]
    pub fn presence_penalty(mut self, presence_penalty: f64) -> Self {
        self.request.presence_penalty = Some(presence_penalty);
        self
    }

    /// Set stop sequences
    #[must_use]
    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.request.stop = Some(stop);
        self
    }

    /// Set user
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.request.user = Some(user.into());
        self
    }

    /// Add a provider-specific parameter
    #[must_use]
    pub fn additional_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.request
            .additional_properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Build the request
    ///
    /// # Errors
    /// Returns error if messages are missing or malformed
    pub fn build(self) -> Result<ChatRequest, crate::error::GatewayError> {
        self.request.validate_request()?;
        Ok(self.request)
    }
}

/// Chat message with role and content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: MessageRole,

    /// Content of the message
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub content: String,

    /// Optional name of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Create a message with the given role
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Set the author name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("content must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Provider-ready request: the caller's request after defaulting.
///
/// `extensions` are merged into the top level of the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRequest {
    /// Resolved model
    pub model: String,

    /// Conversation messages
    pub messages: Vec<ChatMessage>,

    /// Resolved max_tokens
    pub max_tokens: u32,

    /// Resolved temperature
    pub temperature: f64,

    /// Resolved stream flag
    pub stream: bool,

    /// Top-p, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Frequency penalty, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,

    /// Presence penalty, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,

    /// Stop sequences, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// End-user identifier, passed through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Provider-specific fields, present only for providers with an extension
    #[serde(flatten)]
    pub extensions: Option<Map<String, Value>>,
}

impl EffectiveRequest {
    /// Serialize into the JSON body sent to the provider
    ///
    /// # Errors
    /// Returns error if a value cannot be represented as JSON
    pub fn to_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
