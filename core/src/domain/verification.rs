//! Verification handle and session value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token issued by the identity provider when an OTP verification is
/// started, and required to complete it.
///
/// The handle is persisted under a single fixed storage key for the lifetime
/// of one sign-in attempt so that a restarted process can still complete the
/// code entry. Each new attempt overwrites the previous handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationHandle(String);

impl VerificationHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed-in session issued by the identity provider after a successful
/// code verification. Opaque to this crate beyond its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned identifier for the signed-in user.
    pub user_id: String,
    /// Bearer token for the authenticated session.
    pub session_token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_token: session_token.into(),
        }
    }
}
