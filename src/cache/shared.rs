//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`] for use from request handlers
//! and background tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, Lookup};

// == Sweep ==
/// A cache that can be swept for expired entries by the cleanup task.
#[async_trait]
pub trait Sweep: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Removes expired entries, returning how many were dropped.
    async fn sweep(&self) -> usize;
}

// == Shared Cache ==
/// Cloneable, named handle to a cache store guarded by an async RwLock.
///
/// Every read takes the write lock: reads may remove expired entries and
/// always update the hit/miss counters. The lock is never held across an
/// upstream call.
pub struct SharedCache<V> {
    name: Arc<str>,
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<V: Clone + Send + Sync> SharedCache<V> {
    /// Wraps a store under a display name.
    pub fn new(name: &str, store: CacheStore<V>) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        self.inner.write().await.has(key)
    }

    pub async fn lookup(&self, key: &str) -> Lookup<V> {
        self.inner.write().await.lookup(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn cleanup(&self) -> usize {
        self.inner.write().await.cleanup()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.write().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> Sweep for SharedCache<V> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn sweep(&self) -> usize {
        self.cleanup().await
    }
}
