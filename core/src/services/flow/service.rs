//! Sign-in flow orchestrator implementation.

use std::sync::{Arc, Mutex, PoisonError};
use tracing;

use crate::domain::{PhoneNumber, VerificationHandle};
use crate::errors::FlowError;

use super::traits::{FlowUiTrait, HandleStoreTrait, IdentityProviderTrait, RiskCheckerTrait};
use super::types::{FlowOutcome, FlowState, SimSwapVerdict, UiInputState};

const SIM_CHANGE_ALERT_TITLE: &str = "SIM Change Detected";
const SIM_CHANGE_ALERT_MESSAGE: &str = "SIM changed too recently. Please contact support.";
const APP_ERROR_ALERT_TITLE: &str = "App Error";
const PROVIDER_ERROR_ALERT_TITLE: &str = "Error";
const SUCCESS_ALERT_TITLE: &str = "Message";
const SUCCESS_ALERT_MESSAGE: &str = "Sign in Success";

/// Orchestrator for one phone sign-in attempt.
///
/// Sequences the risk check, the provider OTP round trip, handle
/// persistence, and every UI-visible state change. One attempt runs at a
/// time: the submit control stays disabled for the whole span from
/// submission until the flow returns to [`FlowState::Idle`], which is also
/// the mutual-exclusion mechanism for submissions (there is no internal
/// lock).
pub struct SignInFlow<R, P, H, U>
where
    R: RiskCheckerTrait,
    P: IdentityProviderTrait,
    H: HandleStoreTrait,
    U: FlowUiTrait,
{
    /// Risk check integration
    risk_checker: Arc<R>,
    /// Identity provider integration
    identity_provider: Arc<P>,
    /// Durable storage for the in-flight verification handle
    handle_store: Arc<H>,
    /// UI surface driven by the flow
    ui: Arc<U>,
    /// Observable machine state; written only by the flow itself
    state: Mutex<FlowState>,
}

impl<R, P, H, U> SignInFlow<R, P, H, U>
where
    R: RiskCheckerTrait,
    P: IdentityProviderTrait,
    H: HandleStoreTrait,
    U: FlowUiTrait,
{
    /// Create a new sign-in flow.
    ///
    /// # Arguments
    ///
    /// * `risk_checker` - SIM-swap risk check implementation
    /// * `identity_provider` - OTP start/complete implementation
    /// * `handle_store` - Durable verification-handle storage
    /// * `ui` - UI surface (input toggle, code prompt, alerts)
    pub fn new(
        risk_checker: Arc<R>,
        identity_provider: Arc<P>,
        handle_store: Arc<H>,
        ui: Arc<U>,
    ) -> Self {
        Self {
            risk_checker,
            identity_provider,
            handle_store,
            ui,
            state: Mutex::new(FlowState::Idle),
        }
    }

    /// Current machine state. Observability only; submissions are serialized
    /// by the disabled submit control, not by reading this.
    pub fn state(&self) -> FlowState {
        *self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: FlowState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let from = *state;
        tracing::debug!(?from, to = ?next, event = "flow_transition", "Sign-in flow transition");
        *state = next;
    }

    /// Submit a raw phone number and run one sign-in attempt to its terminal
    /// outcome.
    ///
    /// This method:
    /// 1. Normalizes the input (strips all whitespace); empty input is a
    ///    no-op and nothing is shown to the user
    /// 2. Disables input and starts the busy indicator
    /// 3. Runs the SIM-swap risk check
    /// 4. On a clean verdict, starts OTP verification, persists the handle,
    ///    and prompts for the code
    /// 5. Completes verification with the persisted handle and entered code
    /// 6. Re-enables input exactly once, as the single exit back to idle
    ///
    /// Every terminal path other than prompt cancellation surfaces an alert
    /// before input is re-enabled.
    pub async fn submit(&self, raw_phone: &str) -> FlowOutcome {
        let phone = match PhoneNumber::normalize(raw_phone) {
            Some(phone) => phone,
            None => {
                tracing::debug!(
                    event = "submit_ignored",
                    "Empty phone number submitted; flow not started"
                );
                return FlowOutcome::NotStarted;
            }
        };

        self.ui.set_input_state(UiInputState::Busy).await;

        let outcome = self.run_attempt(&phone).await;

        // Single exit point: input is re-enabled exactly once per attempt,
        // as part of returning to Idle.
        self.ui.set_input_state(UiInputState::Idle).await;
        self.transition(FlowState::Idle);

        outcome
    }

    /// Risk-check the number and branch on the verdict.
    async fn run_attempt(&self, phone: &PhoneNumber) -> FlowOutcome {
        self.transition(FlowState::Checking);
        tracing::info!(
            phone = %phone.masked(),
            event = "risk_check_started",
            "Running SIM-swap risk check"
        );

        match self.risk_checker.check_sim_swap(phone).await {
            Ok(SimSwapVerdict::NoRecentChange) => self.start_verification(phone).await,
            Ok(SimSwapVerdict::RecentChange) => {
                self.transition(FlowState::Rejected);
                tracing::warn!(
                    phone = %phone.masked(),
                    event = "sim_change_detected",
                    "Recent SIM change reported; sign-in refused"
                );
                self.ui
                    .alert(SIM_CHANGE_ALERT_TITLE, SIM_CHANGE_ALERT_MESSAGE)
                    .await;
                FlowOutcome::SimChangeDetected
            }
            Err(e) => {
                self.transition(FlowState::Failed);
                tracing::error!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "risk_check_failed",
                    "SIM-swap risk check failed"
                );
                self.ui.alert(APP_ERROR_ALERT_TITLE, &e.to_string()).await;
                FlowOutcome::Failed(FlowError::RiskCheck(e))
            }
        }
    }

    /// Start OTP verification with the provider and persist the handle.
    async fn start_verification(&self, phone: &PhoneNumber) -> FlowOutcome {
        self.transition(FlowState::Starting);
        tracing::info!(
            phone = %phone.masked(),
            event = "verification_started",
            "Starting OTP verification with identity provider"
        );

        let handle = match self.identity_provider.start_verification(phone).await {
            Ok(handle) => handle,
            Err(e) => {
                self.transition(FlowState::Failed);
                tracing::error!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "verification_start_failed",
                    "Identity provider refused to start verification"
                );
                self.ui
                    .alert(PROVIDER_ERROR_ALERT_TITLE, &e.message)
                    .await;
                return FlowOutcome::Failed(FlowError::Provider(e));
            }
        };

        // Persist before prompting so a restarted process can still complete
        // the attempt. Overwrites any handle from an earlier attempt.
        if let Err(e) = self.handle_store.put_handle(&handle).await {
            self.transition(FlowState::Failed);
            tracing::error!(
                error = %e,
                event = "handle_store_failed",
                "Failed to persist verification handle"
            );
            let err = FlowError::Storage(e);
            self.ui.alert(APP_ERROR_ALERT_TITLE, &err.to_string()).await;
            return FlowOutcome::Failed(err);
        }

        self.await_code().await
    }

    /// Prompt for the one-time code and act on the entry.
    async fn await_code(&self) -> FlowOutcome {
        self.transition(FlowState::AwaitingCode);

        let code = match self.ui.prompt_code().await {
            Some(code) if !code.is_empty() => code,
            // Cancelled, or continued with an empty field: back to idle with
            // no alert and no provider call.
            _ => {
                tracing::debug!(event = "code_entry_cancelled", "Code prompt dismissed");
                return FlowOutcome::Cancelled;
            }
        };

        // Re-read from durable storage rather than using the in-memory
        // handle: this is the same path a relaunched process takes.
        let handle = match self.handle_store.get_handle().await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                self.transition(FlowState::Failed);
                tracing::error!(
                    event = "handle_lost",
                    "Code entered but no verification handle in storage"
                );
                let err = FlowError::HandleLost;
                self.ui.alert(PROVIDER_ERROR_ALERT_TITLE, &err.to_string()).await;
                return FlowOutcome::Failed(err);
            }
            Err(e) => {
                self.transition(FlowState::Failed);
                tracing::error!(
                    error = %e,
                    event = "handle_read_failed",
                    "Could not read verification handle from storage"
                );
                let err = FlowError::HandleLost;
                self.ui.alert(PROVIDER_ERROR_ALERT_TITLE, &err.to_string()).await;
                return FlowOutcome::Failed(err);
            }
        };

        self.complete_verification(&handle, &code).await
    }

    /// Exchange handle and code for a session.
    async fn complete_verification(
        &self,
        handle: &VerificationHandle,
        code: &str,
    ) -> FlowOutcome {
        self.transition(FlowState::Completing);
        tracing::info!(
            event = "verification_completing",
            "Completing OTP verification with identity provider"
        );

        match self.identity_provider.complete_verification(handle, code).await {
            Ok(session) => {
                self.transition(FlowState::Succeeded);
                tracing::info!(
                    user_id = %session.user_id,
                    event = "sign_in_succeeded",
                    "Sign-in completed"
                );
                self.ui.alert(SUCCESS_ALERT_TITLE, SUCCESS_ALERT_MESSAGE).await;
                FlowOutcome::SignedIn(session)
            }
            Err(e) => {
                self.transition(FlowState::Failed);
                tracing::error!(
                    error = %e,
                    event = "verification_complete_failed",
                    "Identity provider rejected the verification"
                );
                self.ui
                    .alert(PROVIDER_ERROR_ALERT_TITLE, &e.message)
                    .await;
                FlowOutcome::Failed(FlowError::Provider(e))
            }
        }
    }
}
