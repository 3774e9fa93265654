//! Cambio Rate Store
//!
//! Fetches exchange rates for a base currency, caches them with a TTL
//! through the widget's key-value store, and substitutes a built-in
//! fallback table when the rate service is unreachable. Loading never
//! fails: the caller always gets a usable table, tagged with where it
//! came from.
//!
//! # Example
//!
//! ```rust,ignore
//! use cambio_common::{Currency, MemoryStore};
//! use cambio_rates::{HttpRateProvider, RateServiceConfig, RateSource, RateStore};
//! use std::sync::Arc;
//!
//! let config = RateServiceConfig::default();
//! let provider = Arc::new(HttpRateProvider::new(&config));
//! let store = RateStore::new(provider, Arc::new(MemoryStore::new()), &config);
//!
//! let loaded = store.load(&Currency::usd()).await;
//! println!("{} rates via {:?}", loaded.table.len(), loaded.source);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod provider;
pub mod store;

pub use cache::RateCache;
pub use config::RateServiceConfig;
pub use error::RateError;
pub use provider::{HttpRateProvider, RateProvider};
pub use store::{LoadedRates, RateSource, RateStore};
