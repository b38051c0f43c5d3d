//! In-memory TTL cache backed by `DashMap` for concurrent access.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// A single cached value with its expiration time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Entries are stored as serialized JSON strings under keys of the form
/// `<resource>:<detail>`. Expired entries are lazily evicted on the next
/// `get` call for that key.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites a cache entry. The entry expires after the configured TTL.
    /// A zero TTL disables caching.
    pub fn set(&self, key: String, value: String) {
        if self.ttl.is_zero() {
            return;
        }
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every entry whose key starts with `prefix`. Returns how many were removed.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let before = self.store.len();
        self.store.retain(|key, _| !key.starts_with(prefix));
        before - self.store.len()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
