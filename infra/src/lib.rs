//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the SimGate sign-in flow is
//! orchestrated over:
//! - **Risk check**: HTTP client for the SIM-swap detection endpoint
//! - **Identity provider**: HTTP client for the OTP start/complete API
//! - **Storage**: durable verification-handle stores (Redis, in-memory)
//!
//! All clients carry bounded request timeouts and are configured from the
//! environment.

/// Risk-check module - SIM-swap detection endpoint client
pub mod risk;

/// Identity module - phone-identity provider client
pub mod identity;

/// Storage module - verification-handle persistence
pub mod storage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis error from the handle store
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
