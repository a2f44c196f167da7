//! Cache Module
//!
//! In-memory response caching with TTL expiration, an optional stale grace
//! window and oldest-first capacity eviction.

mod entry;
mod order;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use shared::{SharedCache, Sweep};
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
