//! The rate store: fail-soft loading with cache and fallback.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use cambio_common::{time, Currency, RateTable, Storage, Timestamp};

use crate::cache::RateCache;
use crate::config::RateServiceConfig;
use crate::fallback;
use crate::provider::RateProvider;

/// Where a loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Freshly fetched from the rate service.
    Live,
    /// Served from the local cache within its TTL.
    Cached,
    /// Built-in approximate table, used when fetching failed.
    Fallback,
}

/// A loaded rate table with provenance.
#[derive(Debug, Clone)]
pub struct LoadedRates {
    pub table: RateTable,
    pub source: RateSource,
    /// When the table's data was obtained. For cached tables this is the
    /// original fetch time, not the cache read time.
    pub loaded_at: Timestamp,
}

/// Owns the active rate table and the cache behind it.
///
/// `load` never fails: cache, then the rate service, then the built-in
/// fallback table, in that order. The loaded table fully replaces the
/// previous active table; tables are never merged. Concurrent loads for
/// the same base are not deduplicated, so callers should not fire
/// overlapping loads for one base.
pub struct RateStore {
    provider: Arc<dyn RateProvider>,
    cache: RateCache,
    active: RwLock<Option<LoadedRates>>,
}

impl RateStore {
    /// Create a store over the given provider and key-value storage.
    pub fn new(
        provider: Arc<dyn RateProvider>,
        storage: Arc<dyn Storage>,
        config: &RateServiceConfig,
    ) -> Self {
        Self {
            provider,
            cache: RateCache::new(storage, config.cache_ttl),
            active: RwLock::new(None),
        }
    }

    /// Load rates for a base currency and make them the active table.
    ///
    /// Fails soft: any fetch or parse failure is logged and recovered
    /// with the built-in fallback table, so conversion always has
    /// best-available data to work with.
    pub async fn load(&self, base: &Currency) -> LoadedRates {
        if let Some((table, stamp)) = self.cache.get(base) {
            debug!(base = %base, "Using cached rates");
            return self.activate(LoadedRates {
                table,
                source: RateSource::Cached,
                loaded_at: stamp,
            });
        }

        match self.provider.fetch(base).await {
            Ok(table) => {
                self.cache.put(&table);
                info!(base = %base, rates = table.len(), "Loaded live rates");
                self.activate(LoadedRates {
                    table,
                    source: RateSource::Live,
                    loaded_at: time::now(),
                })
            }
            Err(e) => {
                warn!(base = %base, error = %e, "Rate fetch failed, using fallback table");
                self.activate(LoadedRates {
                    table: fallback::table_for(base),
                    source: RateSource::Fallback,
                    loaded_at: time::now(),
                })
            }
        }
    }

    /// The currently active table, if any base has been loaded yet.
    pub fn current(&self) -> Option<LoadedRates> {
        self.active.read().clone()
    }

    /// The active table itself, for conversion.
    pub fn current_table(&self) -> Option<RateTable> {
        self.active.read().as_ref().map(|l| l.table.clone())
    }

    fn activate(&self, loaded: LoadedRates) -> LoadedRates {
        *self.active.write() = Some(loaded.clone());
        loaded
    }
}
