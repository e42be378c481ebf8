//! # Gateway Core
//!
//! Core types and error handling for the LLM Provider Gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - Caller-facing request type and the provider-ready effective request
//! - OpenAI-compatible response types
//! - The normalized error type returned to callers
//! - Well-known provider identifiers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use error::{GatewayError, GatewayErrorKind, GatewayResult};
pub use provider::ProviderKind;
pub use request::{ChatMessage, ChatRequest, EffectiveRequest, MessageRole};
pub use response::{ChatResponse, Choice, ResponseMessage, Usage};
