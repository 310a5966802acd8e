//! Google Distance Matrix HTTP client.
//!
//! Answers single origin/destination travel-time queries. Handles the API
//! key, concurrency limiting and conversion of the JSON body into minutes.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::Coord;

use super::TimeOracle;
use super::convert::travel_minutes;
use super::error::OracleError;
use super::types::DistanceMatrixResponse;

/// Default endpoint for the Distance Matrix API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Distance Matrix client.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to the public Google endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance Matrix API client.
///
/// Uses a semaphore to limit concurrent requests so a large prefetch does
/// not trip the API's rate limits.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl DistanceMatrixClient {
    /// Create a new client with the given configuration.
    ///
    /// An empty API key is accepted here and reported as
    /// [`OracleError::CredentialsMissing`] on the first lookup.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch the raw Distance Matrix response for one pair.
    pub async fn get_matrix(
        &self,
        origin: Coord,
        destination: Coord,
    ) -> Result<DistanceMatrixResponse, OracleError> {
        if self.api_key.is_empty() {
            return Err(OracleError::CredentialsMissing);
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OracleError::HttpStatus {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("destinations", destination.to_string()),
                ("origins", origin.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::HttpStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OracleError::MalformedResponse {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TimeOracle for DistanceMatrixClient {
    async fn travel_minutes(&self, from: Coord, to: Coord) -> Result<u32, OracleError> {
        let response = self.get_matrix(from, to).await?;

        match travel_minutes(&response) {
            Ok(minutes) => {
                debug!(from = %from, to = %to, minutes, "distance matrix lookup");
                Ok(minutes)
            }
            Err(e) => {
                warn!(from = %from, to = %to, error = %e, "distance matrix lookup failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OracleConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = OracleConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = DistanceMatrixClient::new(OracleConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn empty_key_fails_before_any_request() {
        // Unroutable base URL: the call must not get as far as the network.
        let config = OracleConfig::new("").with_base_url("http://127.0.0.1:9");
        let client = DistanceMatrixClient::new(config).unwrap();

        let result = client
            .travel_minutes(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0))
            .await;

        assert!(matches!(result, Err(OracleError::CredentialsMissing)));
    }

    #[tokio::test]
    async fn transport_error_omits_request_url() {
        // Nothing listens on the discard port, so the connection is refused.
        let config = OracleConfig::new("SUPERSECRETKEY")
            .with_base_url("http://127.0.0.1:9/matrix")
            .with_timeout(5);
        let client = DistanceMatrixClient::new(config).unwrap();

        let err = client
            .travel_minutes(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, OracleError::Transport(_)));
        let message = err.to_string();
        assert!(!message.contains("SUPERSECRETKEY"), "{message}");
        assert!(!message.contains("127.0.0.1:9/matrix"), "{message}");
    }
}
