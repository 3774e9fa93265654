//! Time utilities and constants for the Cambio widget.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Widget timing constants.
pub mod constants {
    use super::Duration;

    /// How long a cached rate table stays valid (5 minutes).
    pub fn rate_cache_ttl() -> Duration {
        Duration::minutes(5)
    }
}

/// A timestamp with timezone (always UTC for Cambio).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Current time as epoch milliseconds, the stamp format of persisted
/// cache entries and history record ids.
pub fn epoch_millis() -> i64 {
    now().timestamp_millis()
}

/// Restore a timestamp from epoch milliseconds.
///
/// Out-of-range values collapse to the epoch, which any TTL check
/// then treats as long expired.
pub fn from_epoch_millis(millis: i64) -> Timestamp {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Check whether a stamp is older than the given TTL.
pub fn is_stale(stamp: Timestamp, ttl: Duration) -> bool {
    now().signed_duration_since(stamp) > ttl
}
