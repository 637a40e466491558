// Read-through cache for supplier data.
// Entries carry their own TTL; expiry is checked when an entry is read, there
// is no background sweeper.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

// Live counters for the cache
#[derive(Debug, Default)]
pub struct CacheStats {
    pub items_count: AtomicUsize,
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
    pub expired_count: AtomicUsize,
    pub store_count: AtomicUsize,
    pub invalidated_count: AtomicUsize,
}

// Point-in-time copy of the counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatsReport {
    pub items_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub expired_count: usize,
    pub store_count: usize,
    pub invalidated_count: usize,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub default_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 3600,
        }
    }
}

pub trait Cache<V>: Send + Sync + 'static {
    fn new(config: CacheConfig) -> Self
    where
        Self: Sized;

    // Value for the key if present and not expired
    fn get(&self, key: &str) -> Option<V>;

    // Store a value; None uses the configured default TTL
    fn set(&self, key: &str, value: V, ttl: Option<Duration>);

    // Drop an entry ahead of its expiry. Returns true if one was removed.
    fn invalidate(&self, key: &str) -> bool;

    fn stats(&self) -> CacheStatsReport;
}

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    config: CacheConfig,
    stats: CacheStats,
}

impl<V> TtlCache<V> {
    fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.config.default_ttl_seconds)
    }

    fn remove_expired(&self, key: &str) {
        // Only remove if still expired; a concurrent set may have refreshed it
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            self.stats.items_count.fetch_sub(1, Ordering::SeqCst);
            self.stats.expired_count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl<V> Cache<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: CacheStats::default(),
        }
    }

    fn get(&self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.hit_count.fetch_add(1, Ordering::SeqCst);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        // The read guard is released before removing
        if expired {
            debug!(key, "cache entry expired");
            self.remove_expired(key);
        }
        self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
        None
    }

    fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or_else(|| self.default_ttl());
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        };

        if self.entries.insert(key.to_string(), entry).is_none() {
            self.stats.items_count.fetch_add(1, Ordering::SeqCst);
        }
        self.stats.store_count.fetch_add(1, Ordering::SeqCst);
        debug!(key, ttl_secs = ttl.as_secs(), "cache entry stored");
    }

    fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.items_count.fetch_sub(1, Ordering::SeqCst);
            self.stats.invalidated_count.fetch_add(1, Ordering::SeqCst);
        }
        removed
    }

    fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            items_count: self.stats.items_count.load(Ordering::SeqCst),
            hit_count: self.stats.hit_count.load(Ordering::SeqCst),
            miss_count: self.stats.miss_count.load(Ordering::SeqCst),
            expired_count: self.stats.expired_count.load(Ordering::SeqCst),
            store_count: self.stats.store_count.load(Ordering::SeqCst),
            invalidated_count: self.stats.invalidated_count.load(Ordering::SeqCst),
        }
    }
}
