//! HTTP Identity Provider Implementation
//!
//! Client for the managed phone-identity provider's verification API. The
//! provider sends the OTP SMS, issues the verification handle, and exchanges
//! handle + code for a signed-in session; everything past this wire surface
//! is the provider's business. Failures are surfaced with the provider's own
//! message, verbatim.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use sg_core::domain::{PhoneNumber, Session, VerificationHandle};
use sg_core::errors::IdentityProviderError;
use sg_core::services::flow::IdentityProviderTrait;

use crate::InfrastructureError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Identity provider client configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's verification API
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Timeout for provider requests in seconds
    pub request_timeout_secs: u64,
}

impl IdentityConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let base_url = std::env::var("IDENTITY_BASE_URL")
            .map_err(|_| InfrastructureError::Config("IDENTITY_BASE_URL not set".to_string()))?;
        let api_key = std::env::var("IDENTITY_API_KEY")
            .map_err(|_| InfrastructureError::Config("IDENTITY_API_KEY not set".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout_secs: std::env::var("IDENTITY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

#[derive(Serialize)]
struct StartVerificationRequest<'a> {
    phone_number: &'a str,
}

#[derive(Deserialize)]
struct StartVerificationResponse {
    verification_id: String,
}

#[derive(Serialize)]
struct CompleteVerificationRequest<'a> {
    verification_id: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct CompleteVerificationResponse {
    user_id: String,
    session_token: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// HTTP client for the phone-identity provider
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    /// Create a new identity provider client
    pub fn new(config: IdentityConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(base_url = %config.base_url, "Identity provider client initialized");

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = IdentityConfig::from_env()?;
        Self::new(config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

/// Extract the provider's error message from a failure response body,
/// falling back to the HTTP status line when the body has no message.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ProviderErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            format!(
                "Verification service returned {}",
                status.canonical_reason().unwrap_or("an error")
            )
        })
}

#[async_trait]
impl IdentityProviderTrait for HttpIdentityProvider {
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
    ) -> Result<VerificationHandle, IdentityProviderError> {
        debug!(
            phone = %phone.masked(),
            event = "identity_start_request",
            "Requesting OTP verification start"
        );

        let response = self
            .http
            .post(self.endpoint("/v1/verifications"))
            .bearer_auth(&self.config.api_key)
            .json(&StartVerificationRequest {
                phone_number: phone.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "identity_start_transport_failed",
                    "Start-verification request failed"
                );
                IdentityProviderError::new(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(status, &body);
            error!(
                phone = %phone.masked(),
                status = %status,
                event = "identity_start_rejected",
                "Provider refused to start verification: {}",
                message
            );
            return Err(IdentityProviderError::new(message));
        }

        let parsed: StartVerificationResponse = response.json().await.map_err(|e| {
            error!(
                error = %e,
                event = "identity_start_decode_failed",
                "Start-verification response could not be decoded"
            );
            IdentityProviderError::new("Verification service sent an unreadable response")
        })?;

        info!(
            phone = %phone.masked(),
            event = "identity_start_succeeded",
            "OTP verification started"
        );
        Ok(VerificationHandle::new(parsed.verification_id))
    }

    async fn complete_verification(
        &self,
        handle: &VerificationHandle,
        code: &str,
    ) -> Result<Session, IdentityProviderError> {
        debug!(event = "identity_complete_request", "Completing OTP verification");

        let response = self
            .http
            .post(self.endpoint("/v1/verifications/check"))
            .bearer_auth(&self.config.api_key)
            .json(&CompleteVerificationRequest {
                verification_id: handle.as_str(),
                code,
            })
            .send()
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    event = "identity_complete_transport_failed",
                    "Complete-verification request failed"
                );
                IdentityProviderError::new(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(status, &body);
            error!(
                status = %status,
                event = "identity_complete_rejected",
                "Provider rejected the verification: {}",
                message
            );
            return Err(IdentityProviderError::new(message));
        }

        let parsed: CompleteVerificationResponse = response.json().await.map_err(|e| {
            error!(
                error = %e,
                event = "identity_complete_decode_failed",
                "Complete-verification response could not be decoded"
            );
            IdentityProviderError::new("Verification service sent an unreadable response")
        })?;

        info!(
            user_id = %parsed.user_id,
            event = "identity_complete_succeeded",
            "OTP verification completed"
        );
        Ok(Session::new(parsed.user_id, parsed.session_token))
    }
}
