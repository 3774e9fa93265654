//! Rate service configuration.

use chrono::Duration;
use std::time::Duration as StdDuration;

use cambio_common::time::constants;

/// Configuration for the rate service and its cache.
#[derive(Debug, Clone)]
pub struct RateServiceConfig {
    /// Base URL of the rate service; the base currency code is appended
    /// as the final path segment.
    pub base_url: String,
    /// HTTP request timeout.
    pub request_timeout: StdDuration,
    /// How long cached tables stay valid.
    pub cache_ttl: Duration,
}

impl Default for RateServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangerate-api.com/v4/latest".to_string(),
            request_timeout: StdDuration::from_secs(10),
            cache_ttl: constants::rate_cache_ttl(),
        }
    }
}

impl RateServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CAMBIO_RATES_URL") {
            config.base_url = url;
        }

        if let Ok(timeout) = std::env::var("CAMBIO_RATES_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                config.request_timeout = StdDuration::from_millis(ms);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Rate service URL cannot be empty".to_string());
        }

        if self.cache_ttl <= Duration::zero() {
            return Err("Cache TTL must be positive".to_string());
        }

        if self.request_timeout.is_zero() {
            return Err("Request timeout cannot be zero".to_string());
        }

        Ok(())
    }

    /// Full request URL for a base currency.
    pub fn url_for(&self, base: &cambio_common::Currency) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), base.code())
    }
}
