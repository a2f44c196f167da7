//! Cache-then-fetch resolution shared by the cached routes.
//!
//! Every cached route follows the same protocol:
//! 1. fresh cache entry: return it (`Hit`)
//! 2. otherwise fetch; on success cache and return it (`Fresh`)
//! 3. fetch failed but a stale copy is within grace: return it (`Stale`)
//! 4. fetch failed with nothing cached: `Unavailable`, the route decides
//!    between a generated fallback and an error response

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{Lookup, SharedCache};
use crate::error::{FetchError, FetchResult};

/// Outcome of [`resolve_cached`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<V> {
    /// Served from a fresh cache entry
    Hit { value: V, age: Duration },
    /// Fetched now and written to the cache
    Fresh(V),
    /// Upstream failed; an expired copy is served instead
    Stale { value: V, error: FetchError },
    /// Upstream failed and nothing is cached
    Unavailable(FetchError),
}

impl<V> Resolved<V> {
    /// Whether the value came from the cache (fresh or stale).
    pub fn is_cached(&self) -> bool {
        matches!(self, Resolved::Hit { .. } | Resolved::Stale { .. })
    }
}

/// Resolves `key` through `cache`, calling `fetch` on a miss.
///
/// Fetch errors never escape: they are logged and turned into `Stale` or
/// `Unavailable`. The cache lock is not held while `fetch` runs.
pub async fn resolve_cached<V, F, Fut>(cache: &SharedCache<V>, key: &str, fetch: F) -> Resolved<V>
where
    V: Clone + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = FetchResult<V>>,
{
    let stale = match cache.lookup(key).await {
        Lookup::Fresh { value, age } => {
            debug!(cache = cache.name(), key, "Cache hit");
            return Resolved::Hit { value, age };
        }
        Lookup::Stale { value, .. } => Some(value),
        Lookup::Missing => None,
    };

    match fetch().await {
        Ok(value) => {
            debug!(cache = cache.name(), key, "Cache miss, fetched from upstream");
            cache.set(key, value.clone(), None).await;
            Resolved::Fresh(value)
        }
        Err(error) => match stale {
            Some(value) => {
                warn!(cache = cache.name(), key, %error, "Upstream failed, serving stale copy");
                Resolved::Stale { value, error }
            }
            None => {
                warn!(cache = cache.name(), key, %error, "Upstream failed with nothing cached");
                Resolved::Unavailable(error)
            }
        },
    }
}
