//! One full index pass: define, create, await, measure, tear down.

use serde::{Deserialize, Serialize};

use crate::document::SENTINEL_KEY;
use crate::error::{Result, SearchBenchError};
use crate::index::poller::CompletionPoller;
use crate::schema::IndexConfig;
use crate::store::DocumentStore;

/// Name every benchmark index is created under. Only one index exists at a
/// time, so a fixed name suffices.
pub const INDEX_NAME: &str = "idx";

/// The measurements taken from one index configuration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Memory footprint in bytes of the sentinel record.
    pub object_size_bytes: u64,
    /// Aggregate index size in megabytes, summed over the store's reported
    /// components and rounded to two decimal places.
    pub index_size_mb: f64,
}

/// Runs a single index configuration against an already-loaded corpus.
///
/// Store errors during create or drop are fatal to the run and propagate
/// immediately; waiting on an unfinished index is not an error and is
/// handled by the poller.
pub struct IndexLifecycle {
    index_name: String,
    num_fields: usize,
    poller: CompletionPoller,
}

impl IndexLifecycle {
    pub fn new(num_fields: usize) -> Self {
        IndexLifecycle {
            index_name: INDEX_NAME.to_string(),
            num_fields,
            poller: CompletionPoller::new(),
        }
    }

    /// Replace the default poller, e.g. to inject a non-sleeping one in
    /// tests.
    pub fn with_poller(num_fields: usize, poller: CompletionPoller) -> Self {
        IndexLifecycle {
            index_name: INDEX_NAME.to_string(),
            num_fields,
            poller,
        }
    }

    /// Build the index described by `config`, wait for the store to finish
    /// background indexing, measure, and drop the index again. The
    /// underlying records are left untouched so further configurations can
    /// reuse the corpus.
    pub async fn run(
        &self,
        store: &mut dyn DocumentStore,
        config: &IndexConfig,
    ) -> Result<IndexStats> {
        let definition = config.definition(self.num_fields);
        store.create_index(&self.index_name, &definition).await?;

        let status = self.poller.await_indexed(store, &self.index_name).await?;

        let object_size_bytes = store.memory_usage(SENTINEL_KEY).await?.ok_or_else(|| {
            SearchBenchError::index("sentinel record missing; was the corpus loaded?")
        })?;

        let stats = IndexStats {
            object_size_bytes,
            index_size_mb: status.total_size_mb(),
        };

        store.drop_index(&self.index_name).await?;
        Ok(stats)
    }
}
