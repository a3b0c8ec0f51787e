//! Benchmark orchestration: the test matrix, execution order, and result
//! table.
//!
//! A run walks four groups, one per (encoding, data-kind) pair. Each group
//! clears the store, loads one corpus, then measures every applicable index
//! configuration over it: text unsorted, text sorted, and tag for string
//! corpora; numeric unsorted and numeric sorted for numeric corpora. Ten
//! configurations total, always in the same order. If any step fails the
//! run aborts with no partial table.

use std::sync::Arc;

use crate::document::{DataKind, Encoding};
use crate::error::Result;
use crate::index::{IndexLifecycle, IndexStats};
use crate::loader::{LoadPlan, Loader};
use crate::schema::{FieldKind, IndexConfig};
use crate::store::{DocumentStore, StoreFactory};

/// Runtime parameters shared by every group of a run.
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Records loaded per group.
    pub num_keys: u64,
    /// Fields per record, and fields per index schema.
    pub num_fields: usize,
    /// Characters per text field value.
    pub text_len: usize,
    /// Digits per numeric field value.
    pub numeric_len: usize,
    /// Concurrent loader workers.
    pub workers: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            num_keys: 10_000,
            num_fields: 10,
            text_len: 10,
            numeric_len: 10,
            workers: default_workers(),
        }
    }
}

/// One fewer than the available CPUs, but at least one.
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Ordered (label, stats) rows, one per measured configuration. Labels are
/// unique by construction and rows keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<(String, IndexStats)>,
}

impl ResultTable {
    pub fn new() -> Self {
        ResultTable::default()
    }

    pub fn push(&mut self, label: String, stats: IndexStats) {
        debug_assert!(
            !self.rows.iter().any(|(existing, _)| *existing == label),
            "duplicate result row '{label}'"
        );
        self.rows.push((label, stats));
    }

    pub fn rows(&self) -> &[(String, IndexStats)] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&IndexStats> {
        self.rows
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, stats)| stats)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A (encoding, data-kind) pair sharing one loaded corpus.
#[derive(Debug, Clone, Copy)]
struct Group {
    encoding: Encoding,
    data_kind: DataKind,
}

const MATRIX: [Group; 4] = [
    Group {
        encoding: Encoding::Hash,
        data_kind: DataKind::String,
    },
    Group {
        encoding: Encoding::Hash,
        data_kind: DataKind::Number,
    },
    Group {
        encoding: Encoding::Json,
        data_kind: DataKind::String,
    },
    Group {
        encoding: Encoding::Json,
        data_kind: DataKind::Number,
    },
];

impl Group {
    /// The index configurations applicable to this group's corpus, in
    /// measurement order.
    fn variants(&self) -> Result<Vec<IndexConfig>> {
        match self.data_kind {
            DataKind::String => Ok(vec![
                IndexConfig::new(self.encoding, FieldKind::Text, false)?,
                IndexConfig::new(self.encoding, FieldKind::Text, true)?,
                IndexConfig::new(self.encoding, FieldKind::Tag, false)?,
            ]),
            DataKind::Number => Ok(vec![
                IndexConfig::new(self.encoding, FieldKind::Numeric, false)?,
                IndexConfig::new(self.encoding, FieldKind::Numeric, true)?,
            ]),
        }
    }

    fn banner(&self) -> String {
        format!(
            "{} records with {} fields",
            self.encoding.label(),
            self.data_kind.label()
        )
    }
}

/// Owns a full benchmark run over the fixed matrix.
pub struct BenchSuite {
    factory: Arc<dyn StoreFactory>,
    config: BenchConfig,
}

impl BenchSuite {
    pub fn new(factory: Arc<dyn StoreFactory>, config: BenchConfig) -> Self {
        BenchSuite { factory, config }
    }

    /// Run every group in order and return the ten-row result table.
    pub async fn run_all(&self) -> Result<ResultTable> {
        let mut store = self.factory.open().await?;
        let loader = Loader::new(self.config.workers);
        let lifecycle = IndexLifecycle::new(self.config.num_fields);

        let mut table = ResultTable::new();
        let mut test_no = 1usize;

        for group in MATRIX {
            log::info!("{}", group.banner());

            store.clear_all().await?;
            loader
                .load(Arc::clone(&self.factory), self.plan_for(&group))
                .await?;

            for config in group.variants()? {
                let stats = lifecycle.run(store.as_mut(), &config).await?;
                let label = config.label();
                log::info!(
                    "Test {test_no} - {label}: object size {} b, index size {:.2} mb",
                    stats.object_size_bytes,
                    stats.index_size_mb
                );
                table.push(label, stats);
                test_no += 1;
            }
        }

        Ok(table)
    }

    fn plan_for(&self, group: &Group) -> LoadPlan {
        LoadPlan {
            total_keys: self.config.num_keys,
            num_fields: self.config.num_fields,
            encoding: group.encoding,
            data_kind: group.data_kind,
            text_len: self.config.text_len,
            numeric_len: self.config.numeric_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_yields_ten_labels_in_order() {
        let labels: Vec<String> = MATRIX
            .iter()
            .flat_map(|group| group.variants().unwrap())
            .map(|config| config.label())
            .collect();

        assert_eq!(
            labels,
            vec![
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
            ]
        );
    }

    #[test]
    fn test_string_groups_never_sort_tags() {
        for group in MATRIX {
            for config in group.variants().unwrap() {
                if config.field_kind() == FieldKind::Tag {
                    assert!(!config.sortable());
                }
            }
        }
    }

    #[test]
    fn test_result_table_keeps_insertion_order() {
        let stats = IndexStats {
            object_size_bytes: 10,
            index_size_mb: 0.5,
        };

        let mut table = ResultTable::new();
        table.push("b".to_string(), stats);
        table.push("a".to_string(), stats);

        assert_eq!(table.labels(), vec!["b", "a"]);
        assert_eq!(table.len(), 2);
        assert!(table.get("a").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_default_workers_at_least_one() {
        assert!(default_workers() >= 1);
        assert!(BenchConfig::default().workers >= 1);
    }
}
