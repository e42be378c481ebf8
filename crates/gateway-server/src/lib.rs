//! # Gateway Server
//!
//! HTTP server for the LLM Provider Gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server with graceful shutdown
//! - Chat completion, provider listing, provider status and health endpoints
//! - Prometheus metrics endpoint
//! - Uniform JSON error responses

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use error::{ApiError, ErrorResponse, ServerError};
pub use routes::create_router;
pub use server::{shutdown_signal, Server, ServerConfig};
pub use state::AppState;
