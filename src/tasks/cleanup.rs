//! Cache Sweep Task
//!
//! Background task that periodically drops entries past their TTL and
//! stale grace window from every store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Sweep;

/// Spawns a background task that sweeps `caches` every `cleanup_interval_secs`.
///
/// Reads already ignore expired entries, so the sweep only bounds memory
/// held by keys nobody asks for again.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_cleanup_task(state.caches.sweepers(), 600);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task(
    caches: Vec<Arc<dyn Sweep>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task for {} stores with interval of {} seconds",
            caches.len(),
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            for cache in &caches {
                let removed = cache.sweep().await;
                if removed > 0 {
                    info!(cache = cache.name(), removed, "Cache sweep removed expired entries");
                } else {
                    debug!(cache = cache.name(), "Cache sweep found no expired entries");
                }
            }
        }
    })
}
