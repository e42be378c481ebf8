//! # Gateway Providers
//!
//! Provider abstraction for the LLM Provider Gateway.
//!
//! This crate provides:
//! - The provider registry and availability rules
//! - Request adaptation (model resolution, defaults, provider extensions)
//! - Per-provider authentication headers
//! - The HTTP transport used to reach OpenAI-compatible backends

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod headers;
pub mod registry;
pub mod transport;

// Re-export main types
pub use adapter::{AnthropicExtension, RequestAdapter, RequestExtension};
pub use headers::{AuthScheme, HeaderBuilder, ANTHROPIC_VERSION};
pub use registry::ProviderRegistry;
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};
