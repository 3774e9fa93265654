//! Rate provider trait and implementations.

use async_trait::async_trait;
use cambio_common::{Currency, RateTable};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::RateServiceConfig;
use crate::error::{RateError, RateResult};

/// Source of exchange rate tables for a base currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Fetch the full rate table for a base currency.
    async fn fetch(&self, base: &Currency) -> RateResult<RateTable>;
}

/// Wire shape of the rate service response.
#[derive(Debug, Deserialize)]
struct RatesPayload {
    rates: HashMap<String, f64>,
}

/// HTTP rate provider: `GET <base_url>/<BASE>`.
pub struct HttpRateProvider {
    client: Client,
    config: RateServiceConfig,
}

impl HttpRateProvider {
    /// Create a provider for the configured rate service.
    pub fn new(config: &RateServiceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch(&self, base: &Currency) -> RateResult<RateTable> {
        let url = self.config.url_for(base);
        debug!(base = %base, url = %url, "Fetching rates");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RateError::Status {
                base: base.clone(),
                status: response.status().as_u16(),
            });
        }

        let payload: RatesPayload = response
            .json()
            .await
            .map_err(|_| RateError::MalformedPayload(base.clone()))?;

        let usable: Vec<(String, f64)> = payload
            .rates
            .into_iter()
            .filter(|(code, rate)| {
                if rate.is_finite() && *rate > 0.0 {
                    true
                } else {
                    warn!(base = %base, code = %code, rate, "Dropping non-positive rate");
                    false
                }
            })
            .collect();

        if usable.is_empty() {
            return Err(RateError::EmptyTable(base.clone()));
        }

        // `from_pairs` normalizes the base's own key to 1.
        let table = RateTable::from_pairs(base.clone(), usable);
        debug!(base = %base, rates = table.len(), "Fetched rate table");

        Ok(table)
    }
}

/// In-memory rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticRateProvider {
    name: String,
    tables: dashmap::DashMap<String, RateTable>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticRateProvider {
    /// Create a new static provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: dashmap::DashMap::new(),
        }
    }

    /// Set the table returned for a base currency.
    pub fn set_table(&self, table: RateTable) {
        self.tables.insert(table.base.code().to_string(), table);
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, base: &Currency) -> RateResult<RateTable> {
        self.tables
            .get(base.code())
            .map(|t| t.clone())
            .ok_or_else(|| RateError::Unavailable(base.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_set_table() {
        let provider = StaticRateProvider::new("test");
        provider.set_table(RateTable::from_pairs(Currency::usd(), [("BRL", 5.20)]));

        let table = provider.fetch(&Currency::usd()).await.unwrap();

        assert_eq!(table.base, Currency::usd());
        assert_eq!(table.rate_for(&Currency::brl()), Some(5.20));
    }

    #[tokio::test]
    async fn test_static_provider_unknown_base() {
        let provider = StaticRateProvider::new("test");

        let result = provider.fetch(&Currency::eur()).await;

        assert!(matches!(result, Err(RateError::Unavailable(_))));
    }
}
