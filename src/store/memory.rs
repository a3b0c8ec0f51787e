//! In-memory store implementation.
//!
//! A deterministic stand-in for the networked store, used by tests and
//! shared across handles: every handle opened from one [`MemoryFactory`]
//! sees the same underlying state, mirroring how concurrent workers all
//! talk to one server. Index sizes are modelled, not measured: they grow
//! with record count, field count, and value length, and sortable fields
//! carry extra weight so size comparisons behave like the real store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::document::{Encoding, Record, storage_key};
use crate::error::{Result, SearchBenchError};
use crate::schema::{FieldKind, IndexDefinition};
use crate::store::{DocumentStore, IndexStatus, StoreFactory};

const MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<u64, (Encoding, Record)>,
    indexes: HashMap<String, IndexDefinition>,
    status_plan: Vec<f64>,
    plan_cursor: usize,
}

/// Shared-state in-memory store. Cloning yields another handle to the same
/// state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Create a store whose successive `index_status` calls report the given
    /// `percent_indexed` values, then 1.0 once the plan is exhausted. Size
    /// components are computed from the stored records as usual.
    pub fn with_status_plan(plan: Vec<f64>) -> Self {
        let store = MemoryStore::new();
        store.inner.lock().unwrap().status_plan = plan;
        store
    }

    /// Number of distinct records currently stored.
    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    /// Whether a record exists under `key`.
    pub fn contains_key(&self, key: u64) -> bool {
        self.inner.lock().unwrap().records.contains_key(&key)
    }

    /// Whether an index definition named `name` currently exists.
    pub fn has_index(&self, name: &str) -> bool {
        self.inner.lock().unwrap().indexes.contains_key(name)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn clear_all(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.records.clear();
        inner.indexes.clear();
        Ok(())
    }

    async fn write_batch(&mut self, encoding: Encoding, records: &[Record]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for record in records {
            inner
                .records
                .insert(record.key, (encoding, record.clone()));
        }
        Ok(())
    }

    async fn create_index(&mut self, name: &str, definition: &IndexDefinition) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.indexes.contains_key(name) {
            return Err(SearchBenchError::index(format!(
                "index '{name}' already exists"
            )));
        }
        inner.indexes.insert(name.to_string(), definition.clone());
        Ok(())
    }

    async fn index_status(&mut self, name: &str) -> Result<IndexStatus> {
        let mut inner = self.inner.lock().unwrap();

        let definition = inner
            .indexes
            .get(name)
            .cloned()
            .ok_or_else(|| SearchBenchError::index(format!("unknown index name '{name}'")))?;

        let percent_indexed = if inner.plan_cursor < inner.status_plan.len() {
            let value = inner.status_plan[inner.plan_cursor];
            inner.plan_cursor += 1;
            value
        } else {
            1.0
        };

        let mut status = modelled_sizes(&inner.records, &definition);
        status.percent_indexed = percent_indexed;
        Ok(status)
    }

    async fn drop_index(&mut self, name: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .indexes
            .remove(name)
            .ok_or_else(|| SearchBenchError::index(format!("unknown index name '{name}'")))?;
        Ok(())
    }

    async fn memory_usage(&mut self, key: u64) -> Result<Option<u64>> {
        let inner = self.inner.lock().unwrap();
        let Some((encoding, record)) = inner.records.get(&key) else {
            return Ok(None);
        };

        let bytes = match encoding {
            Encoding::Hash => {
                56 + record
                    .fields()
                    .map(|(name, value)| name.len() + value.encoded_len() + 16)
                    .sum::<usize>()
            }
            Encoding::Json => 40 + record.to_json().to_string().len(),
        };
        Ok(Some(bytes as u64))
    }
}

/// Derive size components from the stored corpus and the index definition.
fn modelled_sizes(
    records: &HashMap<u64, (Encoding, Record)>,
    definition: &IndexDefinition,
) -> IndexStatus {
    let mut inverted = 0usize;
    let mut offset_vectors = 0usize;
    let mut doc_table = 0usize;
    let mut sortable_values = 0usize;
    let mut key_table = 0usize;

    for (key, (_, record)) in records {
        doc_table += 48;
        key_table += 16 + storage_key(*key).len();

        for (ordinal, field) in definition.fields.iter().enumerate() {
            let Some(value) = record.values.get(ordinal) else {
                continue;
            };
            let value_len = value.encoded_len();

            inverted += value_len + 8;
            if field.kind == FieldKind::Text {
                offset_vectors += 4;
            }
            if field.sortable {
                sortable_values += value_len.max(8) + 8;
            }
        }
    }

    IndexStatus {
        percent_indexed: 1.0,
        inverted_sz_mb: inverted as f64 / MB,
        vector_index_sz_mb: 0.0,
        offset_vectors_sz_mb: offset_vectors as f64 / MB,
        doc_table_size_mb: doc_table as f64 / MB,
        sortable_values_size_mb: sortable_values as f64 / MB,
        key_table_size_mb: key_table as f64 / MB,
    }
}

/// Hands out handles sharing one [`MemoryStore`] state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFactory {
    store: MemoryStore,
}

impl MemoryFactory {
    pub fn new(store: MemoryStore) -> Self {
        MemoryFactory { store }
    }
}

#[async_trait]
impl StoreFactory for MemoryFactory {
    async fn open(&self) -> Result<Box<dyn DocumentStore>> {
        Ok(Box::new(self.store.clone()))
    }
}
