use crate::models::OverpassResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// In-memory cache of raw Overpass responses
///
/// Public Overpass instances are rate limited, so identical queries issued
/// within the TTL are answered locally.
pub struct QueryCache {
    entries: moka::future::Cache<String, OverpassResponse>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up the response for a query text
    pub async fn get(&self, overpass_ql: &str) -> Option<OverpassResponse> {
        let key = CacheKey::query(overpass_ql);
        match self.entries.get(&key).await {
            Some(response) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Response cache hit: {}", key);
                Some(response)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Response cache miss: {}", key);
                None
            }
        }
    }

    pub async fn insert(&self, overpass_ql: &str, response: OverpassResponse) {
        let key = CacheKey::query(overpass_ql);
        self.entries.insert(key.clone(), response).await;
        tracing::trace!("Response cache set: {}", key);
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;

        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            entries: self.entries.entry_count(),
            hits,
            misses,
            hit_rate: if lookups > 0 { hits as f64 / lookups as f64 } else { 0.0 },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key from the full query text
    pub fn query(overpass_ql: &str) -> String {
        format!("overpass:{}", overpass_ql)
    }
}
