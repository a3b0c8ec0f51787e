//! Full benchmark runs against the in-memory store.

use std::sync::Arc;

use searchbench::document::{DataKind, Encoding};
use searchbench::index::IndexLifecycle;
use searchbench::loader::{LoadPlan, Loader};
use searchbench::schema::{FieldKind, IndexConfig};
use searchbench::store::{MemoryFactory, MemoryStore, StoreFactory};
use searchbench::suite::{BenchConfig, BenchSuite};

const EXPECTED_LABELS: [&str; 10] = [
    "Hash Text Unsorted",
    "Hash Text Sorted",
    "Hash Tag",
    "Hash Numeric Unsorted",
    "Hash Numeric Sorted",
    "JSON Text Unsorted",
    "JSON Text Sorted",
    "JSON Tag",
    "JSON Numeric Unsorted",
    "JSON Numeric Sorted",
];

fn small_config(workers: usize) -> BenchConfig {
    BenchConfig {
        num_keys: 200,
        num_fields: 4,
        text_len: 10,
        numeric_len: 10,
        workers,
    }
}

#[tokio::test]
async fn test_run_all_produces_ten_rows_in_order() {
    let store = MemoryStore::new();
    let factory: Arc<dyn StoreFactory> = Arc::new(MemoryFactory::new(store.clone()));
    let suite = BenchSuite::new(factory, small_config(1));

    let table = suite.run_all().await.unwrap();

    assert_eq!(table.len(), 10);
    assert_eq!(table.labels(), EXPECTED_LABELS.to_vec());

    for (label, stats) in table.rows() {
        assert!(stats.object_size_bytes > 0, "{label}: empty object size");
        assert!(stats.index_size_mb >= 0.0, "{label}: negative index size");
    }

    // The run finishes with no index left behind.
    assert!(!store.has_index("idx"));
}

#[tokio::test]
async fn test_run_all_with_parallel_loader() {
    let store = MemoryStore::new();
    let factory: Arc<dyn StoreFactory> = Arc::new(MemoryFactory::new(store.clone()));
    let suite = BenchSuite::new(factory, small_config(4));

    let table = suite.run_all().await.unwrap();

    assert_eq!(table.labels(), EXPECTED_LABELS.to_vec());
    for (label, stats) in table.rows() {
        assert!(stats.object_size_bytes > 0, "{label}: empty object size");
    }
}

#[tokio::test]
async fn test_sorted_variants_at_least_as_large_as_unsorted() {
    let factory: Arc<dyn StoreFactory> = Arc::new(MemoryFactory::new(MemoryStore::new()));
    let suite = BenchSuite::new(factory, small_config(1));

    let table = suite.run_all().await.unwrap();

    for (unsorted, sorted) in [
        ("Hash Text Unsorted", "Hash Text Sorted"),
        ("Hash Numeric Unsorted", "Hash Numeric Sorted"),
        ("JSON Text Unsorted", "JSON Text Sorted"),
        ("JSON Numeric Unsorted", "JSON Numeric Sorted"),
    ] {
        let unsorted_stats = table.get(unsorted).unwrap();
        let sorted_stats = table.get(sorted).unwrap();
        assert!(
            sorted_stats.index_size_mb >= unsorted_stats.index_size_mb,
            "{sorted} ({}) smaller than {unsorted} ({})",
            sorted_stats.index_size_mb,
            unsorted_stats.index_size_mb
        );
    }
}

#[tokio::test]
async fn test_teardown_preserves_corpus_for_next_configuration() {
    let store = MemoryStore::new();
    let factory: Arc<dyn StoreFactory> = Arc::new(MemoryFactory::new(store.clone()));

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
    let loaded = store.record_count();

    let lifecycle = IndexLifecycle::new(2);
    let config = IndexConfig::new(Encoding::Hash, FieldKind::Text, false).unwrap();
    let mut handle = factory.open().await.unwrap();

    // Two load-free runs of the same configuration over the same corpus.
    let first = lifecycle.run(handle.as_mut(), &config).await.unwrap();
    let second = lifecycle.run(handle.as_mut(), &config).await.unwrap();

    assert_eq!(store.record_count(), loaded);
    assert_eq!(first.object_size_bytes, second.object_size_bytes);
    assert!(!store.has_index("idx"));
}
