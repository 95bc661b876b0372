//! In-memory caching using moka
//!
//! Holds rate period indexes built from contract snapshots. The cache is
//! a pure optimization: the engine computes the same result with or
//! without it, and it is read-only with respect to pricing. The contract
//! editor bumps the snapshot version on every change, so a stale index is
//! detected on lookup and rebuilt; explicit invalidation is also exposed
//! for the editing screens.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::pricing::rates::RatePeriodIndex;

/// A built index together with the contract version it was built from.
#[derive(Debug, Clone)]
pub struct CachedRateIndex {
    pub version: i32,
    pub index: RatePeriodIndex,
}

/// Application cache holding per-contract rate indexes
#[derive(Clone)]
pub struct AppCache {
    /// Rate indexes (contract id -> built index + source version)
    pub rate_indexes: Cache<Uuid, Arc<CachedRateIndex>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rate indexes: 1000 contracts, 30 min TTL, 10 min idle
            rate_indexes: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rate_indexes_size: self.rate_indexes.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.rate_indexes.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate the cached index for one contract, called by the
    /// contract-editing screens whenever periods, rates or offers change
    pub async fn invalidate_contract(&self, contract_id: Uuid) {
        self.rate_indexes.invalidate(&contract_id).await;
        info!("Cache invalidated for contract: {}", contract_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub rate_indexes_size: u64,
}
