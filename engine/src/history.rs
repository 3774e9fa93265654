//! Bounded conversion history, persisted whole on every mutation.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use cambio_common::{time, Currency, Storage, StorageExt};

/// Storage key for the persisted history list.
pub const HISTORY_KEY: &str = "conversionHistory";

/// Default number of records kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// One completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Creation time in epoch milliseconds; doubles as the record id.
    pub id: i64,
    pub amount: f64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub result: f64,
    /// `result / amount`, taken from the raw computed floats.
    pub rate: f64,
    /// Creation time, RFC 3339.
    pub timestamp: String,
}

impl ConversionRecord {
    fn new(amount: f64, from: Currency, to: Currency, result: f64) -> Self {
        let created = time::now();
        let rate = if amount == 0.0 { 0.0 } else { result / amount };
        Self {
            id: created.timestamp_millis(),
            amount,
            from_currency: from,
            to_currency: to,
            result,
            rate,
            timestamp: created.to_rfc3339(),
        }
    }
}

/// Most-recent-first list of conversions, capped and persisted under
/// [`HISTORY_KEY`].
///
/// Recording is not idempotent: two identical conversions yield two
/// records, distinguished by creation time.
pub struct History {
    storage: Arc<dyn Storage>,
    records: RwLock<Vec<ConversionRecord>>,
    capacity: usize,
}

impl History {
    /// Load the persisted history, degrading to empty on corrupt data.
    pub fn load(storage: Arc<dyn Storage>, capacity: usize) -> Self {
        let records = match storage.read_json::<Vec<ConversionRecord>>(HISTORY_KEY) {
            Ok(Some(mut list)) => {
                list.truncate(capacity);
                debug!(records = list.len(), "Loaded conversion history");
                list
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Unreadable conversion history, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            records: RwLock::new(records),
            capacity,
        }
    }

    /// Record a completed conversion: prepend, cap, persist.
    pub fn record(
        &self,
        amount: f64,
        from: Currency,
        to: Currency,
        result: f64,
    ) -> ConversionRecord {
        let record = ConversionRecord::new(amount, from, to, result);

        let mut records = self.records.write();
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        self.persist(&records);

        record
    }

    /// Drop all records and persist the empty list.
    pub fn clear(&self) {
        let mut records = self.records.write();
        records.clear();
        self.persist(&records);
    }

    /// Snapshot of the records, most recent first.
    pub fn records(&self) -> Vec<ConversionRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn persist(&self, records: &[ConversionRecord]) {
        // A persist failure costs durability, not correctness; the
        // in-memory list stays authoritative for this session.
        if let Err(e) = self.storage.write_json(HISTORY_KEY, &records) {
            warn!(error = %e, "Failed to persist conversion history");
        }
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use cambio_common::MemoryStore;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn length_never_exceeds_capacity(n in 0usize..30) {
            let storage = Arc::new(MemoryStore::new());
            let history = History::load(storage.clone(), DEFAULT_CAPACITY);

            for i in 0..n {
                history.record(i as f64 + 1.0, Currency::usd(), Currency::brl(), 5.2);
            }

            prop_assert_eq!(history.len(), n.min(DEFAULT_CAPACITY));

            let persisted: Vec<ConversionRecord> =
                storage.read_json(HISTORY_KEY).unwrap().unwrap_or_default();
            prop_assert_eq!(persisted.len(), history.len());
        }
    }
}
