use super::IntegrationError;
use crate::health::{Check, Integration};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes an HTTP endpoint with a GET request.
///
/// Transport failures are returned as errors. A response with an unexpected
/// status is reported as an unhealthy check carrying the status line.
pub struct HttpIntegration {
    name: String,
    url: reqwest::Url,
    expected_status: Option<StatusCode>,
    client: reqwest::Client,
}

impl HttpIntegration {
    pub fn new(name: impl Into<String>, url: reqwest::Url) -> Result<Self, IntegrationError> {
        Self::with_timeout(name, url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        name: impl Into<String>,
        url: reqwest::Url,
        timeout: Duration,
    ) -> Result<Self, IntegrationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IntegrationError::Client)?;

        Ok(Self {
            name: name.into(),
            url,
            expected_status: None,
            client,
        })
    }

    /// Require an exact status instead of any 2xx.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected_status = Some(status);
        self
    }

    fn accepts(&self, status: StatusCode) -> bool {
        match self.expected_status {
            Some(expected) => status == expected,
            None => status.is_success(),
        }
    }
}

#[async_trait]
impl Integration for HttpIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(name = "Check HTTP endpoint", skip(self), fields(url = %self.url))]
    async fn handle(&self) -> anyhow::Result<Check> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| IntegrationError::Request {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        if self.accepts(status) {
            Ok(Check::healthy(self.url.as_str()))
        } else {
            tracing::warn!("Endpoint returned unexpected status: {}", status);
            Ok(Check::unhealthy(
                self.url.as_str(),
                format!("unexpected status: {}", status),
            ))
        }
    }
}
