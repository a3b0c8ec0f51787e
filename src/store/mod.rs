//! Store abstraction: the document/search service the benchmark drives.
//!
//! The benchmark core only depends on [`DocumentStore`]; the Redis
//! implementation lives in [`redis_storage`] and an in-memory implementation
//! for tests in [`memory`]. Workers never share a handle: a [`StoreFactory`]
//! opens a fresh handle per caller, so there is no ambient global connection.

pub mod memory;
pub mod redis_storage;

use async_trait::async_trait;

use crate::document::{Encoding, Record};
use crate::error::Result;
use crate::schema::IndexDefinition;

pub use memory::{MemoryFactory, MemoryStore};
pub use redis_storage::{RedisFactory, RedisStore};

/// Status of a secondary index as reported by the store.
///
/// `percent_indexed` is the fraction of the corpus indexed so far; the size
/// components are the store's reported per-structure sizes in megabytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndexStatus {
    pub percent_indexed: f64,
    pub inverted_sz_mb: f64,
    pub vector_index_sz_mb: f64,
    pub offset_vectors_sz_mb: f64,
    pub doc_table_size_mb: f64,
    pub sortable_values_size_mb: f64,
    pub key_table_size_mb: f64,
}

impl IndexStatus {
    /// Whether background indexing has reached 100%.
    pub fn is_complete(&self) -> bool {
        self.percent_indexed >= 1.0
    }

    /// Aggregate index size: the sum of all size components, rounded to two
    /// decimal places.
    pub fn total_size_mb(&self) -> f64 {
        let total = self.inverted_sz_mb
            + self.vector_index_sz_mb
            + self.offset_vectors_sz_mb
            + self.doc_table_size_mb
            + self.sortable_values_size_mb
            + self.key_table_size_mb;
        round2(total)
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The store operations the benchmark core depends on.
///
/// All writes are upserts. `create_index` starts asynchronous background
/// indexing on the store side and returns before it completes; progress is
/// observed through `index_status`.
#[async_trait]
pub trait DocumentStore: Send {
    /// Wipe all keys (and any indexes over them). Irrecoverable.
    async fn clear_all(&mut self) -> Result<()>;

    /// Write a batch of records under `encoding` in one pipelined
    /// round-trip.
    async fn write_batch(&mut self, encoding: Encoding, records: &[Record]) -> Result<()>;

    /// Submit an index definition. Returns once the store has accepted it,
    /// not once indexing has finished.
    async fn create_index(&mut self, name: &str, definition: &IndexDefinition) -> Result<()>;

    /// Report indexing progress and size statistics for `name`.
    async fn index_status(&mut self, name: &str) -> Result<IndexStatus>;

    /// Delete the index definition. The underlying records persist.
    async fn drop_index(&mut self, name: &str) -> Result<()>;

    /// Memory footprint in bytes of the record stored under `key`, or
    /// `None` if no such record exists.
    async fn memory_usage(&mut self, key: u64) -> Result<Option<u64>>;
}

/// Opens store handles on demand.
///
/// Each loader worker calls `open` for its own handle, constructed from the
/// connection parameters captured by the factory.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn DocumentStore>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_size_sums_components() {
        let status = IndexStatus {
            percent_indexed: 1.0,
            inverted_sz_mb: 1.25,
            vector_index_sz_mb: 0.0,
            offset_vectors_sz_mb: 0.5,
            doc_table_size_mb: 0.125,
            sortable_values_size_mb: 0.0,
            key_table_size_mb: 0.0625,
        };

        assert_eq!(status.total_size_mb(), 1.94);
        assert!(status.is_complete());
    }

    #[test]
    fn test_total_size_rounds_to_two_places() {
        let status = IndexStatus {
            percent_indexed: 1.0,
            inverted_sz_mb: 0.004,
            ..IndexStatus::default()
        };
        assert_eq!(status.total_size_mb(), 0.0);

        let status = IndexStatus {
            percent_indexed: 1.0,
            inverted_sz_mb: 0.005,
            ..IndexStatus::default()
        };
        assert_eq!(status.total_size_mb(), 0.01);
    }

    #[test]
    fn test_incomplete_below_one() {
        let status = IndexStatus {
            percent_indexed: 0.999,
            ..IndexStatus::default()
        };
        assert!(!status.is_complete());
    }
}
