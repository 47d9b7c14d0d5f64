//! Search result cache
//!
//! Memoizes discovery outcomes per `(lat, lon, radius, query)` for a fixed
//! time-to-live. Time comes from an injected [`Clock`] so expiry can be
//! driven deterministically in tests.
//!
//! Only definitive outcomes are stored. A failed search is never cached,
//! so the next identical call goes back to the source.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{Clock, SystemClock};
use crate::services::SearchOutcome;

/// Default time-to-live for cached outcomes (1 hour)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default upper bound on stored entries
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 256;

/// Configuration for the search cache
#[derive(Debug, Clone)]
pub struct SearchCacheConfig {
    /// How long an outcome stays valid
    pub ttl: Duration,
    /// Maximum number of stored outcomes (0 disables caching)
    pub max_entries: usize,
}

impl Default for SearchCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// Cache key: coordinate, radius and the query exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    lat_bits: u64,
    lon_bits: u64,
    radius_m: u32,
    query: String,
}

impl SearchKey {
    /// Build a key
    ///
    /// Coordinates compare by bit pattern; `-0.0` is folded into `0.0`.
    #[must_use]
    pub fn new(lat: f64, lon: f64, radius_m: u32, query: impl Into<String>) -> Self {
        Self {
            lat_bits: (lat + 0.0).to_bits(),
            lon_bits: (lon + 0.0).to_bits(),
            radius_m,
            query: query.into(),
        }
    }

    /// The raw query part of the key
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the computation
    pub misses: u64,
    /// Entries currently stored (expired ones included until evicted)
    pub entries: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: SearchOutcome,
    inserted_at: DateTime<Utc>,
}

/// Time-bounded memo of search outcomes
pub struct SearchCache {
    entries: RwLock<HashMap<SearchKey, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl fmt::Debug for SearchCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCache")
            .field("entries", &self.entries.read().len())
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(SearchCacheConfig::default())
    }
}

impl SearchCache {
    /// Create a cache backed by the system clock
    #[must_use]
    pub fn new(config: SearchCacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache backed by `clock`
    #[must_use]
    pub fn with_clock(config: SearchCacheConfig, clock: Arc<dyn Clock>) -> Self {
        let ttl = TimeDelta::from_std(config.ttl).unwrap_or(TimeDelta::MAX);
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl,
            max_entries: config.max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached outcome for `key`, or run `compute` and cache its result
    ///
    /// No lock is held while `compute` runs; concurrent misses on the same
    /// key each compute and the last writer wins.
    pub async fn get_or_compute<F, Fut>(&self, key: &SearchKey, compute: F) -> SearchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SearchOutcome>,
    {
        if let Some(outcome) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(query = %key.query(), "Search cache hit");
            return outcome;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(query = %key.query(), "Search cache miss");

        let outcome = compute().await;
        self.insert(key.clone(), &outcome);
        outcome
    }

    /// Look up a live entry, evicting it if expired
    #[must_use]
    pub fn get(&self, key: &SearchKey) -> Option<SearchOutcome> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !self.is_expired(entry, now) => return Some(entry.outcome.clone()),
                Some(_) => {},
            }
        }

        let mut entries = self.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| self.is_expired(entry, now))
        {
            entries.remove(key);
            debug!(query = %key.query(), "Evicted expired search result");
        }
        None
    }

    /// Store an outcome if it is cacheable
    pub fn insert(&self, key: SearchKey, outcome: &SearchOutcome) {
        if !outcome.is_cacheable() || self.max_entries == 0 {
            return;
        }

        let now = self.clock.now();
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            entries.retain(|_, entry| now - entry.inserted_at < self.ttl);

            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                    debug!(query = %oldest.query(), "Evicted oldest search result");
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                outcome: outcome.clone(),
                inserted_at: now,
            },
        );
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len() as u64,
        }
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at >= self.ttl
    }
}
