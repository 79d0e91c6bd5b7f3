//! REST client for the training executor's HTTP endpoint.
//!
//! The hand-off must not block a client-facing request for the duration
//! of training, so the whole request (connect, send, response) is bounded
//! by the timeout configured at construction.

use std::time::Duration;

use crate::payload::TrainingDispatch;

/// HTTP client for a training executor service.
pub struct ExecutorApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the executor REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorApiError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The executor returned a non-2xx status code.
    #[error("Executor API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ExecutorApi {
    /// Create a new client for an executor service.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://trainer:8500`.
    /// * `dispatch_timeout` - Upper bound on one dispatch round trip.
    pub fn new(base_url: String, dispatch_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(dispatch_timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, base_url }
    }

    /// Base HTTP URL of the executor.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hand a training specification to the executor.
    ///
    /// Sends `POST /train`. A 2xx response only acknowledges receipt;
    /// results arrive later on the callback endpoint named in the
    /// payload.
    pub async fn dispatch(&self, payload: &TrainingDispatch) -> Result<(), ExecutorApiError> {
        let response = self
            .client
            .post(format!("{}/train", self.base_url))
            .json(payload)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ExecutorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ExecutorApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
