//! # Gateway Routing
//!
//! Request routing for the LLM Provider Gateway.
//!
//! [`GatewayRouter`] resolves the target provider, checks that it is
//! available, adapts the request and headers to the provider's conventions,
//! dispatches it with the provider's timeout and normalizes every outcome to
//! a [`ChatResponse`](gateway_core::ChatResponse) or a
//! [`GatewayError`](gateway_core::GatewayError). Each request goes to exactly
//! one provider; there is no retry or fallback.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod router;

// Re-export main types
pub use router::{GatewayRouter, GatewayRouterBuilder};
