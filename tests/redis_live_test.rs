//! End-to-end tests against a live Redis with the RediSearch and RedisJSON
//! modules loaded. Ignored by default; run with `--ignored` when a server is
//! available. These tests flush the target database.

use std::sync::Arc;

use searchbench::document::{DataKind, Encoding, SENTINEL_KEY};
use searchbench::index::IndexLifecycle;
use searchbench::loader::{LoadPlan, Loader};
use searchbench::schema::{FieldKind, IndexConfig};
use searchbench::store::{DocumentStore, RedisFactory, RedisStore, StoreFactory};
use searchbench::suite::{BenchConfig, BenchSuite};

const REDIS_URL: &str = "redis://localhost:6379";

/// Helper to check if Redis is available
async fn redis_available() -> bool {
    RedisStore::connect(REDIS_URL).await.is_ok()
}

#[tokio::test]
#[ignore = "Requires Redis with RediSearch and RedisJSON running locally"]
async fn test_text_index_sizes_end_to_end() {
    if !redis_available().await {
        println!("Redis not available, skipping test");
        return;
    }

    let factory: Arc<dyn StoreFactory> = Arc::new(RedisFactory::new(REDIS_URL));
    let mut store = factory.open().await.unwrap();
    store.clear_all().await.unwrap();

    let loader = Loader::new(1);
    loader
        .load(
            Arc::clone(&factory),
            LoadPlan {
                total_keys: 100,
                num_fields: 2,
                encoding: Encoding::Hash,
                data_kind: DataKind::String,
                text_len: 5,
                numeric_len: 3,
            },
        )
        .await
        .unwrap();

    let lifecycle = IndexLifecycle::new(2);
    let unsorted = lifecycle
        .run(
            store.as_mut(),
            &IndexConfig::new(Encoding::Hash, FieldKind::Text, false).unwrap(),
        )
        .await
        .unwrap();
    let sorted = lifecycle
        .run(
            store.as_mut(),
            &IndexConfig::new(Encoding::Hash, FieldKind::Text, true).unwrap(),
        )
        .await
        .unwrap();

    assert!(unsorted.object_size_bytes > 0);
    assert!(sorted.object_size_bytes > 0);
    assert!(unsorted.index_size_mb >= 0.0);
    assert!(
        sorted.index_size_mb >= unsorted.index_size_mb,
        "sortable fields should not shrink the index"
    );

    // Cleanup
    store.clear_all().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Redis with RediSearch and RedisJSON running locally"]
async fn test_sentinel_measurable_after_parallel_load() {
    if !redis_available().await {
        println!("Redis not available, skipping test");
        return;
    }

    let factory: Arc<dyn StoreFactory> = Arc::new(RedisFactory::new(REDIS_URL));
    let mut store = factory.open().await.unwrap();
    store.clear_all().await.unwrap();

    let loader = Loader::new(4);
    loader
        .load(
            Arc::clone(&factory),
            LoadPlan {
                total_keys: 1_000,
                num_fields: 3,
                encoding: Encoding::Json,
                data_kind: DataKind::Number,
                text_len: 10,
                numeric_len: 10,
            },
        )
        .await
        .unwrap();

    let usage = store.memory_usage(SENTINEL_KEY).await.unwrap();
    assert!(usage.unwrap_or(0) > 0, "sentinel record must be measurable");

    // Cleanup
    store.clear_all().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Redis with RediSearch and RedisJSON running locally"]
async fn test_full_matrix_end_to_end() {
    if !redis_available().await {
        println!("Redis not available, skipping test");
        return;
    }

    let factory: Arc<dyn StoreFactory> = Arc::new(RedisFactory::new(REDIS_URL));
    let suite = BenchSuite::new(
        Arc::clone(&factory),
        BenchConfig {
            num_keys: 50,
            num_fields: 2,
            text_len: 5,
            numeric_len: 3,
            workers: 2,
        },
    );

    let table = suite.run_all().await.unwrap();

    assert_eq!(table.len(), 10);
    for (label, stats) in table.rows() {
        assert!(stats.object_size_bytes > 0, "{label}: empty object size");
        assert!(stats.index_size_mb >= 0.0, "{label}: negative index size");
    }

    // Cleanup
    let mut store = factory.open().await.unwrap();
    store.clear_all().await.unwrap();
}
