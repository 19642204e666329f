//! Traits for the collaborators the sign-in flow is orchestrated over.

use async_trait::async_trait;

use crate::domain::{PhoneNumber, Session, VerificationHandle};
use crate::errors::{IdentityProviderError, RiskCheckError};

use super::types::{SimSwapVerdict, UiInputState};

/// Trait for the SIM-swap risk check integration.
#[async_trait]
pub trait RiskCheckerTrait: Send + Sync {
    /// Run one risk check for the given phone number. Exactly one request
    /// per invocation; no retries.
    async fn check_sim_swap(&self, phone: &PhoneNumber)
        -> Result<SimSwapVerdict, RiskCheckError>;
}

/// Trait for the managed phone-identity provider integration.
///
/// The provider delivers the OTP SMS and exchanges handle + code for a
/// signed-in session; both operations are opaque beyond their results.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Ask the provider to send an OTP to the phone number. Returns the
    /// handle that must accompany the later completion call.
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
    ) -> Result<VerificationHandle, IdentityProviderError>;

    /// Exchange handle and user-entered code for a signed-in session.
    async fn complete_verification(
        &self,
        handle: &VerificationHandle,
        code: &str,
    ) -> Result<Session, IdentityProviderError>;
}

/// Trait for durable storage of the in-flight verification handle.
///
/// One fixed key holds the current handle; writes overwrite, reads return
/// the last written value or absent. The store must survive process
/// restarts.
#[async_trait]
pub trait HandleStoreTrait: Send + Sync {
    /// Persist the handle, replacing any previous one.
    async fn put_handle(&self, handle: &VerificationHandle) -> Result<(), String>;

    /// Recover the most recently persisted handle, if any.
    async fn get_handle(&self) -> Result<Option<VerificationHandle>, String>;
}

/// Trait for the UI surface the flow drives.
///
/// Implementations own marshalling onto their UI thread; the flow calls
/// these sequentially from its own task and never concurrently.
#[async_trait]
pub trait FlowUiTrait: Send + Sync {
    /// Toggle the phone field, submit control, and busy indicator.
    async fn set_input_state(&self, state: UiInputState);

    /// Present the modal one-time-code prompt. `None` means the user
    /// cancelled; an empty string means they continued without a code.
    async fn prompt_code(&self) -> Option<String>;

    /// Present a blocking alert.
    async fn alert(&self, title: &str, message: &str);
}
