//! Cache Store Module
//!
//! Bounded key/value store with lazy TTL expiration and insertion-order eviction.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Lookup ==
/// Outcome of reading a key while allowing stale copies.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    /// The entry is within its TTL
    Fresh { value: V, age: Duration },
    /// The entry expired but is still inside the stale grace window
    Stale { value: V, age: Duration },
    /// Nothing usable is stored
    Missing,
}

impl<V> Lookup<V> {
    /// Returns the value only when it is fresh.
    pub fn fresh(self) -> Option<V> {
        match self {
            Lookup::Fresh { value, .. } => Some(value),
            _ => None,
        }
    }
}

// == Cache Store ==
/// Cache storage with TTL expiration and capacity eviction.
///
/// Expiry is checked on read: an expired entry is never returned by
/// [`get`](Self::get) or [`has`](Self::has). It is physically removed the
/// first time it is observed once past `expires_at + stale_grace`; with the
/// default zero grace that is the first observation after expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    order: InsertionOrder,
    stats: CacheStats,
    max_entries: usize,
    default_ttl: Duration,
    stale_grace: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL applied when `set` is called without one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(max_entries),
            max_entries,
            default_ttl,
            stale_grace: Duration::ZERO,
        }
    }

    /// Keeps expired entries readable through [`lookup`](Self::lookup) for `grace`.
    pub fn with_stale_grace(mut self, grace: Duration) -> Self {
        self.stale_grace = grace;
        self
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and resetting its TTL.
    ///
    /// When the store is full and `key` is new, the oldest inserted entry is
    /// evicted first. Overwrites keep the key's original insertion position.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache keys must be non-empty");
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.order.record(&key);
        self.stats.set_size(self.entries.len());
    }

    // == Get ==
    /// Returns the value if present and not expired.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.lookup(key).fresh()
    }

    // == Has ==
    /// Same expiry semantics as `get`, without cloning the value.
    pub fn has(&mut self, key: &str) -> bool {
        let now = Instant::now();
        let fresh = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => true,
            Some(entry) => {
                if entry.is_past_grace(now, self.stale_grace) {
                    self.remove_entry(key);
                }
                false
            }
            None => false,
        };

        if fresh {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        fresh
    }

    // == Lookup ==
    /// Reads a key, distinguishing fresh, stale-but-servable and missing.
    pub fn lookup(&mut self, key: &str) -> Lookup<V> {
        let now = Instant::now();
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return Lookup::Missing;
        };

        let age = now.saturating_duration_since(entry.inserted_at);
        if !entry.is_expired_at(now) {
            let value = entry.value.clone();
            self.stats.record_hit();
            return Lookup::Fresh { value, age };
        }

        self.stats.record_miss();
        if entry.is_past_grace(now, self.stale_grace) {
            self.remove_entry(key);
            Lookup::Missing
        } else {
            Lookup::Stale {
                value: entry.value.clone(),
                age,
            }
        }
    }

    // == Delete ==
    /// Removes an entry, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_size(0);
    }

    // == Cleanup ==
    /// Removes every entry that can no longer be served, fresh or stale.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let grace = self.stale_grace;
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_past_grace(now, grace))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.set_size(self.entries.len());
        count
    }

    // == Stats ==
    /// Sweeps expired entries, then returns current statistics.
    ///
    /// `size` counts live entries only; expired copies kept for the stale
    /// grace window are left out.
    pub fn stats(&mut self) -> CacheStats {
        self.cleanup();
        let now = Instant::now();
        let live = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count();
        let mut stats = self.stats.clone();
        stats.set_size(live);
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including unswept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_size(self.entries.len());
        }
        removed
    }
}
