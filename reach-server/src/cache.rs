//! Caching layer for coverage reports.
//!
//! The served network is immutable, so a report depends only on the
//! threshold and the selected categories. Entries expire by TTL and
//! capacity only; there is nothing to invalidate on write.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Category, Cost};
use crate::reach::CoverageReport;

/// Cache key for reports: (threshold bits, selected categories).
/// `None` means every category in the index.
type ReportKey = (u64, Option<Vec<Category>>);

/// Cached report entry.
type ReportEntry = Arc<CoverageReport>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 256,
        }
    }
}

/// Cache of coverage reports.
pub struct CoverageCache {
    reports: MokaCache<ReportKey, ReportEntry>,
}

impl CoverageCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let reports = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { reports }
    }

    /// Build the key for a threshold and category selection.
    ///
    /// The selection is sorted and deduplicated so equivalent requests share
    /// an entry.
    pub fn key(threshold: Cost, categories: Option<&[Category]>) -> ReportKey {
        let categories = categories.map(|c| {
            let mut c = c.to_vec();
            c.sort();
            c.dedup();
            c
        });
        (threshold.value().to_bits(), categories)
    }

    /// Get a cached report.
    pub async fn get(&self, key: &ReportKey) -> Option<ReportEntry> {
        self.reports.get(key).await
    }

    /// Insert a report into the cache.
    pub async fn insert(&self, key: ReportKey, entry: ReportEntry) {
        self.reports.insert(key, entry).await;
    }

    /// Number of cached reports. Lags behind inserts until moka runs its
    /// pending maintenance.
    pub fn entry_count(&self) -> u64 {
        self.reports.entry_count()
    }

    #[cfg(test)]
    async fn sync(&self) {
        self.reports.run_pending_tasks().await;
    }
}
