//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value with its insertion and expiration instants.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub inserted_at: Instant,
    /// When the entry stops being fresh
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that stays fresh for `ttl`.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Past Grace ==
    /// Returns true once the entry is expired and `grace` has also elapsed.
    ///
    /// Entries past grace can no longer be served as stale and are removed.
    pub fn is_past_grace(&self, now: Instant, grace: Duration) -> bool {
        now >= self.expires_at + grace
    }

    // == Age ==
    /// Time since the entry was written.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }

    // == Time To Live ==
    /// Returns the remaining fresh time, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
