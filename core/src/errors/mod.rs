//! Domain-specific error types for the sign-in flow.
//!
//! Transport and HTTP-layer failures are folded into these taxonomies by the
//! infrastructure clients before they reach the orchestrator, so the flow
//! only ever branches on domain errors, never on transport detail.

use thiserror::Error;

/// Classified failure of a SIM-swap risk check request.
///
/// The `Display` text is what the user sees in the "App Error" alert.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCheckError {
    /// The endpoint answered with an HTTP status in [400, 500).
    #[error("The SIM check service rejected the request")]
    BadRequest,

    /// The endpoint answered 200 but the response carried no body.
    #[error("The SIM check service returned no data")]
    NoData,

    /// The response body could not be decoded, or the verdict field was
    /// missing or not a boolean.
    #[error("The SIM check response could not be read")]
    DecodingFailure,

    /// Transport failure, timeout, or any other HTTP status.
    #[error("The SIM check service is unavailable")]
    Other,
}

/// Opaque failure reported by the identity provider.
///
/// Carries the provider-native message verbatim; that message is surfaced to
/// the user unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct IdentityProviderError {
    pub message: String,
}

impl IdentityProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Terminal failure of one sign-in attempt.
///
/// Every variant is recovered at the orchestrator boundary: the user sees an
/// alert and the flow returns to idle with input re-enabled. No failure is
/// fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    RiskCheck(#[from] RiskCheckError),

    #[error(transparent)]
    Provider(#[from] IdentityProviderError),

    /// A code was entered but no verification handle could be recovered from
    /// storage (lost or expired).
    #[error("Verification session was lost. Please start over.")]
    HandleLost,

    /// The verification handle could not be persisted after the provider
    /// issued it.
    #[error("Could not save verification state: {0}")]
    Storage(String),
}

pub type FlowResult<T> = Result<T, FlowError>;
