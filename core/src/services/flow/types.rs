//! Types for sign-in flow states and results.

use crate::domain::Session;
use crate::errors::FlowError;

/// Verdict of a successfully evaluated SIM-swap risk check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimSwapVerdict {
    /// No recent SIM change; the sign-in flow may proceed.
    NoRecentChange,
    /// The SIM changed too recently; sign-in is refused.
    RecentChange,
}

/// Interactivity of the phone field, submit control, and busy indicator.
/// Exactly one of the two holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiInputState {
    /// Input disabled, busy indicator animating.
    Busy,
    /// Input enabled, busy indicator stopped.
    Idle,
}

/// Observable state of the sign-in flow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Resting state; the only state a new submission may start from.
    Idle,
    /// Risk check request in flight.
    Checking,
    /// Risk check refused the number.
    Rejected,
    /// Provider start-verification call in flight.
    Starting,
    /// Code prompt presented, waiting on the user.
    AwaitingCode,
    /// Provider complete-verification call in flight.
    Completing,
    /// Sign-in completed.
    Succeeded,
    /// Attempt failed; alert pending.
    Failed,
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Input was empty after normalization; nothing happened.
    NotStarted,
    /// The risk check reported a recent SIM change; sign-in refused.
    SimChangeDetected,
    /// The user dismissed the code prompt (or entered nothing). Silent.
    Cancelled,
    /// Sign-in completed; the provider issued a session.
    SignedIn(Session),
    /// The attempt failed; the user saw an alert describing the error.
    Failed(FlowError),
}
