//! TTL cache for localized Pokedex names.
//!
//! In-memory cache with per-entry expiration and fetch-on-miss resolution.

mod cache;

pub use cache::{
    CacheConfig, CacheStats, CleanupHandle, LocalizationCache, Resolution, ResolutionSource,
};
