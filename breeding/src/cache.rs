//! Herd statistics cache.
//!
//! Herd statistics are recomputed from the whole herd, so callers that score
//! many pairings keep them in a cache keyed by farm. Entries expire after a
//! TTL measured from the snapshot's `last_updated`; the service additionally
//! discards an entry whose `version` no longer matches the herd fingerprint.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use morphometrics::HerdStatisticsSnapshot;

use crate::config::ServiceConfig;

/// Storage for herd statistics snapshots.
#[async_trait]
pub trait StatisticsCache: Send + Sync {
    /// Fresh snapshot for a key, if any.
    async fn get(&self, key: &str) -> Option<HerdStatisticsSnapshot>;

    /// Store a snapshot, replacing any previous one.
    async fn put(&self, key: &str, snapshot: HerdStatisticsSnapshot);

    /// Drop the snapshot for a key.
    async fn invalidate(&self, key: &str);
}

/// In-process statistics cache with a fixed TTL.
pub struct InMemoryStatisticsCache {
    entries: DashMap<String, HerdStatisticsSnapshot>,
    ttl: Duration,
}

impl InMemoryStatisticsCache {
    /// Create a cache whose entries live for `ttl_secs` seconds.
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Create from service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.statistics_ttl_secs)
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, snapshot: &HerdStatisticsSnapshot, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(snapshot.last_updated) < self.ttl
    }
}

impl Default for InMemoryStatisticsCache {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

#[async_trait]
impl StatisticsCache for InMemoryStatisticsCache {
    async fn get(&self, key: &str) -> Option<HerdStatisticsSnapshot> {
        let snapshot = self.entries.get(key).map(|entry| entry.value().clone())?;
        if self.is_fresh(&snapshot, Utc::now()) {
            debug!(key = %key, version = %snapshot.version, "Statistics cache hit");
            Some(snapshot)
        } else {
            debug!(key = %key, "Statistics cache entry expired");
            self.entries.remove(key);
            None
        }
    }

    async fn put(&self, key: &str, snapshot: HerdStatisticsSnapshot) {
        self.entries.insert(key.to_string(), snapshot);
    }

    async fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }
}
