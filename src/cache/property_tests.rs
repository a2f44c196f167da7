//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple insertion-ordered model.

use proptest::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{CacheStore, SharedCache};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

/// Reference model: a Vec of (key, value) in insertion order.
#[derive(Default)]
struct Model {
    entries: Vec<(String, String)>,
}

impl Model {
    fn set(&mut self, key: String, value: String, capacity: usize) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return;
        }
        if self.entries.len() >= capacity {
            self.entries.remove(0);
        }
        self.entries.push((key, value));
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn delete(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before != self.entries.len()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any sequence of set/get/delete behaves like the insertion-ordered model,
    // and the hit/miss counters match the reads performed.
    #[test]
    fn prop_store_matches_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(capacity, TEST_DEFAULT_TTL);
        let mut model = Model::default();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), None);
                    model.set(key, value, capacity);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(got, model.get(&key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.delete(&key));
                }
            }
            prop_assert!(store.len() <= capacity);
            prop_assert_eq!(store.len(), model.entries.len());
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.size, model.entries.len());
    }

    // After any sequence of sets, size never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let max_entries = 7;
        let mut store = CacheStore::new(max_entries, TEST_DEFAULT_TTL);

        for (key, value) in entries {
            store.set(key, value, None);
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }

    // Filling to capacity with distinct keys and inserting one more evicts
    // exactly the first key inserted, whatever was read in between.
    #[test]
    fn prop_oldest_inserted_is_evicted(
        keys in prop::collection::hash_set("[a-z]{3,8}", 2..10),
        reads in prop::collection::vec(0usize..10, 0..20),
        new_value in value_strategy()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let mut store = CacheStore::new(capacity, TEST_DEFAULT_TTL);

        for key in &keys {
            store.set(key.clone(), format!("value_{key}"), None);
        }
        for index in reads {
            store.get(&keys[index % capacity]);
        }

        store.set("NEW", new_value.clone(), None);

        prop_assert_eq!(store.len(), capacity);
        prop_assert_eq!(store.get(&keys[0]), None);
        prop_assert_eq!(store.get("NEW"), Some(new_value));
        for key in keys.iter().skip(1) {
            prop_assert!(store.has(key), "Key '{}' should survive", key);
        }
    }
}

// Fewer cases for tests that sleep
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // A value is readable before its TTL and absent after, with or without
    // an intervening cleanup.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        sweep in any::<bool>()
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        store.set(key.clone(), value.clone(), Some(Duration::from_millis(40)));
        prop_assert_eq!(store.get(&key), Some(value));

        sleep(Duration::from_millis(60));
        if sweep {
            store.cleanup();
        }

        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.has(&key));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent writers and readers through the shared handle leave the
    // store within capacity and every read returns a value that was written.
    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let written: std::collections::HashSet<String> = operations
            .iter()
            .filter_map(|op| match op {
                CacheOp::Set { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect();

        let outcome: Result<usize, String> = tokio_test::block_on(async move {
            let cache = SharedCache::new("prop", CacheStore::new(5, TEST_DEFAULT_TTL));
            let mut handles = Vec::new();

            for op in operations {
                let cache = cache.clone();
                let written = written.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { key, value } => cache.set(key, value, None).await,
                        CacheOp::Get { key } => {
                            if let Some(value) = cache.get(&key).await {
                                if !written.contains(&value) {
                                    return Err(format!("unexpected value {value:?}"));
                                }
                            }
                        }
                        CacheOp::Delete { key } => {
                            cache.delete(&key).await;
                        }
                    }
                    Ok(())
                }));
            }

            for handle in handles {
                handle.await.map_err(|e| e.to_string())??;
            }
            Ok::<usize, String>(cache.stats().await.size)
        });

        let size = outcome.map_err(TestCaseError::fail)?;
        prop_assert!(size <= 5);
    }
}
