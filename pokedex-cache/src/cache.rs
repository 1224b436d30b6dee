//! In-memory TTL cache for localized names.
//!
//! Resolution runs in two phases: [`LocalizationCache::lookup`] reads a valid
//! entry, and [`LocalizationCache::load_and_store`] fetches, extracts and
//! writes one. [`LocalizationCache::resolve`] chains them.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pokedex_core::constants::{
    DEFAULT_CLEANUP_INTERVAL_SECONDS, DEFAULT_TTL_SECONDS, FALLBACK_TTL_SECONDS,
};
use pokedex_core::types::CacheKey;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL of successfully resolved values in seconds
    pub default_ttl_seconds: u64,
    /// TTL of fallbacks stored after a failed fetch in seconds
    pub fallback_ttl_seconds: u64,
    /// Interval of the periodic expired-entry sweep in seconds
    pub cleanup_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            fallback_ttl_seconds: FALLBACK_TTL_SECONDS,
            cleanup_interval_seconds: DEFAULT_CLEANUP_INTERVAL_SECONDS,
        }
    }
}

impl CacheConfig {
    /// TTL applied to fetched values.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// TTL applied to fallbacks after a fetch failure.
    pub fn fallback_ttl(&self) -> Duration {
        Duration::from_secs(self.fallback_ttl_seconds)
    }

    /// Interval of the background sweep.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

/// Where a resolved value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Valid entry already in the cache
    Cache,
    /// Fetched and extracted
    Fetched,
    /// Fetched, but the record had no entry for the target language
    ExtractionMiss,
    /// Fetch failed; fallback stored with the short TTL
    FetchFailed,
}

/// A resolved value with metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The display string
    pub value: String,
    /// How it was obtained
    pub source: ResolutionSource,
    /// TTL it was stored with; `None` for cache hits
    pub ttl: Option<Duration>,
}

impl Resolution {
    /// Returns true if no fetch was issued.
    pub fn from_cache(&self) -> bool {
        self.source == ResolutionSource::Cache
    }
}

/// In-memory cache of localized display strings.
///
/// Thread-safe and supports TTL-based expiration. There is no size bound:
/// entries live until they expire and are read or swept.
pub struct LocalizationCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    fallbacks: AtomicU64,
}

impl LocalizationCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Gets a cached value.
    ///
    /// Returns None if not cached or expired. An expired entry is dropped.
    pub fn get(&self, key: impl Into<CacheKey>) -> Option<String> {
        let key = key.into();

        {
            let entries = self.entries.read();
            match entries.get(&key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        if entries.get(&key).is_some_and(CacheEntry::is_expired) {
            entries.remove(&key);
        }
        None
    }

    /// Caches a value with the default TTL.
    pub fn set(&self, key: impl Into<CacheKey>, value: impl Into<String>) {
        self.set_with_ttl(key, value, self.config.default_ttl());
    }

    /// Caches a value with a custom TTL, overwriting any previous entry.
    pub fn set_with_ttl(&self, key: impl Into<CacheKey>, value: impl Into<String>, ttl: Duration) {
        self.entries.write().insert(
            key.into(),
            CacheEntry {
                value: value.into(),
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: impl Into<CacheKey>) {
        self.entries.write().remove(&key.into());
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }

    /// Phase one: the valid cached value for `key`, if any.
    pub fn lookup(&self, key: &CacheKey) -> Option<String> {
        let value = self.get(key);
        match value {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache miss");
            }
        }
        value
    }

    /// Phase two: fetch, extract and store, without consulting the cache.
    ///
    /// - `fetch` succeeds and `extract` yields a value: store it with the default TTL.
    /// - `fetch` succeeds and `extract` yields nothing or an empty string: store
    ///   `fallback` with the default TTL.
    /// - `fetch` fails: store `fallback` with the fallback TTL. The error is logged, not returned.
    pub async fn load_and_store<T, E, F, Fut, X>(
        &self,
        key: impl Into<CacheKey>,
        fetch: F,
        extract: X,
        fallback: impl Into<String>,
    ) -> Resolution
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        X: FnOnce(&T) -> Option<String>,
    {
        let key = key.into();

        let (value, source, ttl) = match fetch().await {
            Ok(record) => match extract(&record).filter(|v| !v.is_empty()) {
                Some(value) => (value, ResolutionSource::Fetched, self.config.default_ttl()),
                None => {
                    debug!(key = %key, "No entry for target language, using fallback");
                    (fallback.into(), ResolutionSource::ExtractionMiss, self.config.default_ttl())
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to resolve localized name, caching fallback");
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                (fallback.into(), ResolutionSource::FetchFailed, self.config.fallback_ttl())
            }
        };

        self.set_with_ttl(key, value.clone(), ttl);

        Resolution {
            value,
            source,
            ttl: Some(ttl),
        }
    }

    /// Resolves `key` to a display string.
    ///
    /// Returns the cached value when valid; otherwise runs
    /// [`load_and_store`](Self::load_and_store). Never fails.
    pub async fn resolve<T, E, F, Fut, X>(
        &self,
        key: impl Into<CacheKey>,
        fetch: F,
        extract: X,
        fallback: impl Into<String>,
    ) -> String
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        X: FnOnce(&T) -> Option<String>,
    {
        self.resolve_detailed(key, fetch, extract, fallback).await.value
    }

    /// Like [`resolve`](Self::resolve), reporting where the value came from.
    pub async fn resolve_detailed<T, E, F, Fut, X>(
        &self,
        key: impl Into<CacheKey>,
        fetch: F,
        extract: X,
        fallback: impl Into<String>,
    ) -> Resolution
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        X: FnOnce(&T) -> Option<String>,
    {
        let key = key.into();

        if let Some(value) = self.lookup(&key) {
            return Resolution {
                value,
                source: ResolutionSource::Cache,
                ttl: None,
            };
        }

        self.load_and_store(key, fetch, extract, fallback).await
    }

    /// Sweeps expired entries every `interval` on the tokio runtime.
    ///
    /// The task holds a weak reference and ends once the cache is dropped.
    /// Dropping the returned handle stops it.
    pub fn spawn_cleanup(self: &Arc<Self>, interval: Duration) -> CleanupHandle {
        let cache: Weak<Self> = Arc::downgrade(self);
        let period = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let removed = cache.cleanup_expired();
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
        });

        CleanupHandle { task }
    }
}

impl Default for LocalizationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle of the background sweep started by [`LocalizationCache::spawn_cleanup`].
pub struct CleanupHandle {
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Stops the sweep.
    pub fn stop(self) {
        self.task.abort();
    }

    /// Returns true once the sweep task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CleanupHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to a fetch
    pub misses: u64,
    /// Fetch failures that stored a fallback
    pub fallbacks: u64,
}
