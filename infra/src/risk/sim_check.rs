//! SIM Check Client Implementation
//!
//! HTTP client for the remote SIM-swap detection endpoint. One POST per
//! invocation, no retries; every transport, HTTP, and decoding failure is
//! folded into the [`RiskCheckError`] taxonomy before it reaches the
//! sign-in flow.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use sg_core::domain::PhoneNumber;
use sg_core::errors::RiskCheckError;
use sg_core::services::flow::{RiskCheckerTrait, SimSwapVerdict};

use crate::InfrastructureError;

/// Default request timeout so the flow can never sit busy indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// SIM check client configuration
#[derive(Debug, Clone)]
pub struct SimCheckConfig {
    /// Risk-check endpoint URL
    pub endpoint_url: String,
    /// Timeout for the risk-check request in seconds
    pub request_timeout_secs: u64,
}

impl SimCheckConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let endpoint_url = std::env::var("SIM_CHECK_URL")
            .map_err(|_| InfrastructureError::Config("SIM_CHECK_URL not set".to_string()))?;

        if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
            return Err(InfrastructureError::Config(
                "SIM_CHECK_URL must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            endpoint_url,
            request_timeout_secs: std::env::var("SIM_CHECK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

#[derive(Serialize)]
struct SimCheckRequest<'a> {
    phone_number: &'a str,
}

#[derive(Deserialize)]
struct SimCheckResponse {
    no_sim_change: bool,
}

/// SIM-swap risk check client
pub struct SimCheckClient {
    http: reqwest::Client,
    config: SimCheckConfig,
}

impl SimCheckClient {
    /// Create a new SIM check client
    pub fn new(config: SimCheckConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(
            endpoint = %config.endpoint_url,
            timeout_secs = config.request_timeout_secs,
            "SIM check client initialized"
        );

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = SimCheckConfig::from_env()?;
        Self::new(config)
    }
}

/// Classify an endpoint response into a verdict or error.
///
/// - 200 with an empty body: the endpoint answered but said nothing
/// - 200 with a body: the `no_sim_change` boolean decides the verdict;
///   anything undecodable is a decoding failure (extra fields are ignored)
/// - [400, 500): the request was rejected
/// - anything else: generic failure
fn classify_response(status: StatusCode, body: &[u8]) -> Result<SimSwapVerdict, RiskCheckError> {
    if status == StatusCode::OK {
        if body.is_empty() {
            return Err(RiskCheckError::NoData);
        }
        let parsed: SimCheckResponse =
            serde_json::from_slice(body).map_err(|_| RiskCheckError::DecodingFailure)?;
        if parsed.no_sim_change {
            Ok(SimSwapVerdict::NoRecentChange)
        } else {
            Ok(SimSwapVerdict::RecentChange)
        }
    } else if status.is_client_error() {
        Err(RiskCheckError::BadRequest)
    } else {
        Err(RiskCheckError::Other)
    }
}

#[async_trait]
impl RiskCheckerTrait for SimCheckClient {
    async fn check_sim_swap(
        &self,
        phone: &PhoneNumber,
    ) -> Result<SimSwapVerdict, RiskCheckError> {
        debug!(
            phone = %phone.masked(),
            event = "sim_check_request",
            "Sending SIM check request"
        );

        let response = self
            .http
            .post(&self.config.endpoint_url)
            .json(&SimCheckRequest {
                phone_number: phone.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "sim_check_transport_failed",
                    "SIM check request failed before a response arrived"
                );
                RiskCheckError::Other
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(
                phone = %phone.masked(),
                error = %e,
                event = "sim_check_body_failed",
                "SIM check response body could not be read"
            );
            RiskCheckError::Other
        })?;

        let result = classify_response(status, &body);
        match &result {
            Ok(verdict) => info!(
                phone = %phone.masked(),
                verdict = ?verdict,
                event = "sim_check_evaluated",
                "SIM check evaluated"
            ),
            Err(e) => error!(
                phone = %phone.masked(),
                status = %status,
                error = %e,
                event = "sim_check_failed",
                "SIM check request failed"
            ),
        }
        result
    }
}
