//! Overpass API client
//!
//! Posts Overpass QL to the interpreter endpoint and decodes the JSON
//! element list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OverpassError;
use crate::models::{OverpassElement, OverpassResponse};

/// Trait for Overpass clients
#[async_trait]
pub trait OverpassClient: Send + Sync {
    /// Run a query and return the decoded elements
    async fn fetch(&self, query: &str) -> Result<Vec<OverpassElement>, OverpassError>;

    /// Run a query, logging any failure and returning an empty list instead
    ///
    /// "No results" and "fetch failed" look the same to the caller; use
    /// [`OverpassClient::fetch`] when the difference matters.
    async fn fetch_or_empty(&self, query: &str) -> Vec<OverpassElement> {
        match self.fetch(query).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!(error = %e, "Overpass fetch failed, returning no elements");
                Vec::new()
            },
        }
    }
}

/// HTTP client for a public or self-hosted Overpass instance
#[derive(Debug)]
pub struct HttpOverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl HttpOverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        config
            .validate()
            .map_err(OverpassError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OverpassError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// Parse an Overpass JSON body
    fn parse_response(body: &str) -> Result<OverpassResponse, OverpassError> {
        serde_json::from_str(body).map_err(|e| OverpassError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl OverpassClient for HttpOverpassClient {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn fetch(&self, query: &str) -> Result<Vec<OverpassElement>, OverpassError> {
        let url = self.config.interpreter_url();

        debug!(?url, "Querying Overpass");

        let response = self
            .client
            .post(&url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OverpassError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OverpassError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
            || status == reqwest::StatusCode::GATEWAY_TIMEOUT
        {
            return Err(OverpassError::ServiceUnavailable(format!("HTTP {status}")));
        }

        if !status.is_success() {
            return Err(OverpassError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                OverpassError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                OverpassError::ParseError(e.to_string())
            }
        })?;

        let parsed = Self::parse_response(&body)?;

        if let Some(remark) = &parsed.remark {
            warn!(%remark, "Overpass returned a remark, results may be incomplete");
        }

        debug!(count = parsed.elements.len(), "Overpass elements received");
        Ok(parsed.elements)
    }
}
