//! Async client for the remote flood-forecast service.
//!
//! One [`ApiClient`] owns the reqwest client, base URL and the forecast
//! timeout. Each submodule adds the calls for one area of the service:
//!
//! - [`forecast`]: ward forecast (`GET /predict`)
//! - [`alerts`]: alert registration (`POST /alerts`, `POST /alerts/sms`)
//! - [`sms`]: SMS gateway status and test messages
//! - [`metrics`]: model verification figures
//! - [`dashboard`]: forecast and SMS status fetched together

pub mod alerts;
pub mod dashboard;
pub mod forecast;
pub mod metrics;
pub mod sms;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::ServiceReply;

pub const FORECAST_PATH: &str = "/predict";
pub const ALERTS_PATH: &str = "/alerts";
pub const ALERTS_SMS_PATH: &str = "/alerts/sms";
pub const SMS_INFO_PATH: &str = "/sms/info";
pub const SMS_TEST_PATH: &str = "/sms/test";
pub const MODEL_VERIFICATION_PATH: &str = "/model-verification";

/// Errors that can occur when talking to the forecast service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot connect to {0}")]
    Connection(String),

    #[error("request to {0} timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("failed to parse response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Forecast service client.
///
/// Only the forecast request is bounded by `forecast_timeout`; alert, SMS and
/// metrics calls wait for the server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    forecast_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, forecast_timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("floodcast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            forecast_timeout,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Option<Duration>,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, ?timeout, "GET");

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        self.decode(url, response).await
    }

    async fn post_json<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        self.decode(url, response).await
    }

    /// Decode a 2xx body, or turn anything else into [`ApiError::Status`]
    /// carrying the server's `error`/`message` text when it sent one.
    async fn decode<R: DeserializeOwned>(&self, url: String, response: Response) -> Result<R, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "service returned an error status");
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                message: server_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(url.to_string(), self.forecast_timeout)
        } else if e.is_connect() {
            ApiError::Connection(url.to_string())
        } else {
            ApiError::Http(e)
        }
    }
}

/// Pull a human-readable reason out of an error body.
fn server_message(body: &str) -> Option<String> {
    let reply: ServiceReply = serde_json::from_str(body).ok()?;
    reply
        .error
        .or(reply.message)
        .filter(|m| !m.trim().is_empty())
}
