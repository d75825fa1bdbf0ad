//! HTTP transport seam.

use super::ApiError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, possibly empty.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Checks for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON requests. Network failures come back as
/// [`ApiError::Transport`] with no status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;

    /// Issues a POST request with a JSON body.
    async fn post_json(&self, url: &str, body: &serde_json::Value)
    -> Result<HttpResponse, ApiError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    #[instrument]
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn finish(response: reqwest::Response) -> Result<HttpResponse, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read response body");
            ApiError::Transport {
                status: Some(status),
                message: format!("Failed to read response: {}", e),
            }
        })?;
        debug!(status, body = %body, "Received response");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "GET failed");
                ApiError::network(format!("Network error occurred: {}", e))
            })?;
        Self::finish(response).await
    }

    #[instrument(skip(self, body))]
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ApiError> {
        debug!(body = %body, "Sending POST");
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "POST failed");
                ApiError::network(format!("Network error occurred: {}", e))
            })?;
        Self::finish(response).await
    }
}
