// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Dashboard cache
//!
//! Memoizes full dashboards keyed by the store fingerprint and frequency.
//! Reloading the data produces a new fingerprint, so stale entries are never
//! served; they simply age out.

use crate::aggregator::Aggregator;
use crate::views::Dashboard;
use loadcurve_core::{ResamplingFrequency, Result};
use loadcurve_storage::TimeSeriesStore;
use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CAPACITY: u64 = 64;
const DEFAULT_TTL_SECS: u64 = 600;

type CacheKey = (blake3::Hash, ResamplingFrequency);

/// Cache of computed dashboards
pub struct DashboardCache {
    aggregator: Aggregator,
    cache: Cache<CacheKey, Arc<Dashboard>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DashboardCache {
    pub fn new(aggregator: Aggregator) -> Self {
        Self::with_capacity(aggregator, DEFAULT_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Create a cache holding at most `max_capacity` dashboards for `ttl_secs`
    pub fn with_capacity(aggregator: Aggregator, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            aggregator,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached dashboard for `store` at `frequency`, computing it on a miss.
    ///
    /// Errors are not cached.
    pub fn dashboard(
        &self,
        store: &TimeSeriesStore,
        frequency: ResamplingFrequency,
    ) -> Result<Arc<Dashboard>> {
        let key = (store.fingerprint(), frequency);
        if let Some(dashboard) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(frequency = %frequency, "Dashboard cache hit");
            return Ok(dashboard);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let dashboard = Arc::new(self.aggregator.dashboard(store, frequency)?);
        self.cache.insert(key, Arc::clone(&dashboard));
        debug!(frequency = %frequency, "Dashboard cache miss");
        Ok(dashboard)
    }

    /// Drop every cached dashboard
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
