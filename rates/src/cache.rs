//! Rate table caching with TTL, persisted through the key-value store.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use cambio_common::{time, Currency, RateTable, Storage, StorageExt, Timestamp};

/// Persisted cache entry: a whole rate table plus its fetch stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub rates: RateTable,
    /// Epoch milliseconds at fetch time.
    pub timestamp: i64,
}

/// TTL cache for rate tables, one entry per base currency.
///
/// Entries live in the widget's key-value store under
/// `exchangeRates_<BASE>`. Eviction is lazy: an expired or corrupt entry
/// is deleted the next time it is looked up, never by a background sweep.
pub struct RateCache {
    storage: Arc<dyn Storage>,
    ttl: Duration,
}

impl RateCache {
    /// Create a cache over the given store.
    pub fn new(storage: Arc<dyn Storage>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    /// Get the cached table for a base currency, with its fetch stamp.
    ///
    /// Misses on absent, expired, or unreadable entries; the latter two
    /// are removed on the way out.
    pub fn get(&self, base: &Currency) -> Option<(RateTable, Timestamp)> {
        let key = Self::cache_key(base);

        let entry: CacheEntry = match self.storage.read_json(&key) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(base = %base, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(base = %base, error = %e, "Unreadable cache entry, dropping");
                self.discard(&key);
                return None;
            }
        };

        let stamp = time::from_epoch_millis(entry.timestamp);
        if time::is_stale(stamp, self.ttl) {
            debug!(base = %base, "Cache entry expired");
            self.discard(&key);
            return None;
        }

        debug!(base = %base, "Cache hit");
        Some((entry.rates, stamp))
    }

    /// Store a table under its base currency, stamped with now.
    ///
    /// A store failure is logged and swallowed; the widget keeps working
    /// from the in-memory table.
    pub fn put(&self, table: &RateTable) {
        let key = Self::cache_key(&table.base);
        let entry = CacheEntry {
            rates: table.clone(),
            timestamp: time::epoch_millis(),
        };

        if let Err(e) = self.storage.write_json(&key, &entry) {
            warn!(base = %table.base, error = %e, "Failed to persist cache entry");
        }
    }

    fn discard(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            warn!(key, error = %e, "Failed to remove cache entry");
        }
    }

    fn cache_key(base: &Currency) -> String {
        format!("exchangeRates_{}", base.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_common::MemoryStore;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    fn make_cache(ttl: Duration) -> (RateCache, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (RateCache::new(storage.clone(), ttl), storage)
    }

    fn usd_table() -> RateTable {
        RateTable::from_pairs(Currency::usd(), [("BRL", 5.20), ("EUR", 0.85)])
    }

    #[test]
    fn test_round_trip_within_ttl() {
        let (cache, _) = make_cache(Duration::minutes(5));
        let table = usd_table();

        cache.put(&table);

        let (cached, _) = cache.get(&Currency::usd()).unwrap();
        assert_eq!(cached, table);
    }

    #[test]
    fn test_miss_for_unknown_base() {
        let (cache, _) = make_cache(Duration::minutes(5));
        assert!(cache.get(&Currency::eur()).is_none());
    }

    #[test]
    fn test_expired_entry_is_deleted_on_read() {
        let (cache, storage) = make_cache(Duration::milliseconds(30));
        cache.put(&usd_table());

        sleep(StdDuration::from_millis(50));

        assert!(cache.get(&Currency::usd()).is_none());
        // Lazy eviction removed the persisted entry too.
        assert_eq!(storage.read("exchangeRates_USD").unwrap(), None);
    }

    #[test]
    fn test_corrupt_entry_is_a_miss_and_removed() {
        let (cache, storage) = make_cache(Duration::minutes(5));
        storage.write("exchangeRates_USD", "{broken").unwrap();

        assert!(cache.get(&Currency::usd()).is_none());
        assert_eq!(storage.read("exchangeRates_USD").unwrap(), None);
    }

    #[test]
    fn test_entries_are_keyed_by_base() {
        let (cache, _) = make_cache(Duration::minutes(5));
        cache.put(&usd_table());
        cache.put(&RateTable::from_pairs(Currency::eur(), [("USD", 1.18)]));

        let (usd, _) = cache.get(&Currency::usd()).unwrap();
        let (eur, _) = cache.get(&Currency::eur()).unwrap();

        assert_eq!(usd.base, Currency::usd());
        assert_eq!(eur.base, Currency::eur());
    }
}
