//! BART ETD HTTP client.
//!
//! Provides async methods for querying the BART real-time departures API.
//! Handles the API key, bounded concurrency, and conversion to domain types.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::{StationCode, StationSnapshot};

use super::convert::convert_response;
use super::error::BartError;
use super::types::EtdResponse;

/// Default base URL for the BART API.
const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// BART's published public key. Works for light use without registration.
pub const PUBLIC_API_KEY: &str = "MW9S-E7SL-26DU-VV8V";

/// Requests in flight at once. Enough for the four-station roster.
const MAX_CONCURRENT: usize = 4;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to reach the ETD endpoint.
#[derive(Debug, Clone)]
pub struct BartConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_concurrent: usize,
    pub timeout: Duration,
}

impl BartConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: MAX_CONCURRENT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `BART_API_KEY`, `BART_BASE_URL` and `BART_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. A missing key falls back to
    /// `PUBLIC_API_KEY`; an unparsable timeout keeps the default.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = var("BART_API_KEY").unwrap_or_else(|| {
            warn!("BART_API_KEY not set, using the public demo key");
            PUBLIC_API_KEY.to_string()
        });

        let mut config = Self::new(api_key);
        if let Some(url) = var("BART_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = var("BART_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid BART_TIMEOUT_SECS"),
            }
        }
        config
    }

    /// Point at another host, e.g. a local stub.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for BartConfig {
    fn default() -> Self {
        Self::new(PUBLIC_API_KEY)
    }
}

/// BART ETD API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct BartClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl BartClient {
    /// Create a new BART client with the given configuration.
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Get the live departure board for a station as a domain snapshot.
    pub async fn get_etd(&self, code: StationCode) -> Result<StationSnapshot, BartError> {
        let response = self.fetch_response(code).await?;

        convert_response(&response).map_err(|source| BartError::NoStationData {
            station: code,
            source,
        })
    }

    async fn fetch_response(&self, code: StationCode) -> Result<EtdResponse, BartError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| BartError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/etd.aspx", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("cmd", "etd"),
                ("orig", code.as_str()),
                ("key", self.api_key.as_str()),
                ("json", "y"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(BartError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BartError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BartError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| BartError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = BartConfig::default();

        assert_eq!(config.api_key, PUBLIC_API_KEY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, MAX_CONCURRENT);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_from_vars() {
        let config = BartConfig::from_vars(vars(&[
            ("BART_API_KEY", "test-key"),
            ("BART_BASE_URL", "http://localhost:8080/api/"),
            ("BART_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn config_from_empty_vars_uses_public_key() {
        let config = BartConfig::from_vars(vars(&[("BART_TIMEOUT_SECS", "soon")]));

        assert_eq!(config.api_key, PUBLIC_API_KEY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = BartConfig::from_vars(vars(&[("BART_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn client_creation() {
        let client = BartClient::new(BartConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let config = BartConfig {
            timeout: Duration::from_secs(2),
            ..BartConfig::default().with_base_url("http://127.0.0.1:9")
        };
        let client = BartClient::new(config).unwrap();

        let result = client.get_etd(StationCode::EMBR).await;
        assert!(matches!(result, Err(BartError::Http(_))));
    }
}
