use crate::config::OverpassSettings;
use crate::core::query::AVAILABILITY_QUERY;
use crate::models::OverpassResponse;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Longest error body kept in [`OverpassError::ApiError`]
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur when interacting with the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Overpass returned HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Rate limited by Overpass")]
    RateLimited,

    #[error("Overpass query failed: {0}")]
    Remark(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl OverpassError {
    /// Transport failures, rate limiting and server errors may succeed later
    pub fn is_retryable(&self) -> bool {
        match self {
            OverpassError::RequestError(e) => !e.is_builder(),
            OverpassError::ApiError { status, .. } => *status >= 500,
            OverpassError::RateLimited => true,
            OverpassError::Remark(_) | OverpassError::InvalidResponse(_) => false,
        }
    }
}

/// Overpass API client
///
/// Sends Overpass QL as the `data` parameter of a GET request and decodes
/// the JSON body. Failed attempts are retried with exponential backoff.
pub struct OverpassClient {
    settings: OverpassSettings,
    client: Client,
}

impl OverpassClient {
    /// Create a new client with the configured request timeout
    pub fn new(settings: OverpassSettings) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &OverpassSettings {
        &self.settings
    }

    /// Delay before retrying after the 0-based `attempt` failed
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let secs = self.settings.retry_delay_secs.max(0.0) * 2f64.powi(attempt as i32);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    fn url_for(&self, overpass_ql: &str) -> String {
        format!("{}?data={}", self.settings.url, urlencoding::encode(overpass_ql))
    }

    async fn send_once(&self, overpass_ql: &str) -> Result<OverpassResponse, OverpassError> {
        let response = self.client.get(self.url_for(overpass_ql)).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(OverpassError::ApiError { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse = serde_json::from_str(&body)
            .map_err(|e| OverpassError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(remark) = parsed.runtime_error() {
            return Err(OverpassError::Remark(remark.to_string()));
        }

        Ok(parsed)
    }

    /// Run an Overpass QL query
    ///
    /// Makes up to `max_retries` attempts. Only retryable errors trigger
    /// another attempt; the last error is returned when all of them fail.
    pub async fn query(&self, overpass_ql: &str) -> Result<OverpassResponse, OverpassError> {
        let attempts = self.settings.attempts();
        let mut attempt = 0;

        loop {
            match self.send_once(overpass_ql).await {
                Ok(response) => {
                    tracing::debug!(
                        "Overpass query returned {} elements (attempt {})",
                        response.elements.len(),
                        attempt + 1
                    );
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                    let wait = self.backoff_delay(attempt);
                    tracing::warn!(
                        "Overpass attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt + 1,
                        attempts,
                        e,
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("Overpass query failed after {} attempt(s): {}", attempt + 1, e);
                    return Err(e);
                }
            }
        }
    }

    /// Probe the endpoint with a tiny query and a short timeout
    pub async fn is_available(&self) -> bool {
        let result = self
            .client
            .get(self.url_for(AVAILABILITY_QUERY))
            .timeout(self.settings.availability_timeout())
            .send()
            .await;

        match result {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!("Overpass availability check failed: {}", e);
                false
            }
        }
    }
}
