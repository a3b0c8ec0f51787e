//! Record loading pipeline.
//!
//! A [`Loader`] populates the store with generated records for one benchmark
//! group. Each worker stages every record of its partition into a single
//! pipelined batch and flushes once. Workers share no mutable state and each
//! opens its own store handle from the factory; disjoint partitioning is the
//! only concurrency-safety mechanism.

use std::ops::Range;
use std::sync::Arc;

use rand::Rng;

use crate::datagen::random_record;
use crate::document::{DataKind, Encoding, Record, SENTINEL_KEY};
use crate::error::Result;
use crate::store::{DocumentStore, StoreFactory};

/// Parameters for one load: the corpus shape for a benchmark group.
#[derive(Debug, Clone, Copy)]
pub struct LoadPlan {
    pub total_keys: u64,
    pub num_fields: usize,
    pub encoding: Encoding,
    pub data_kind: DataKind,
    pub text_len: usize,
    pub numeric_len: usize,
}

/// How keys are assigned to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    /// Disjoint contiguous ranges whose union is exactly `[0, total_keys)`,
    /// the first worker absorbing the remainder of integer division. Every
    /// requested key is written exactly once.
    Contiguous,
    /// Each worker writes its share of keys drawn uniformly from the full
    /// u64 space, then (re)writes the sentinel key as its final record.
    ///
    /// Caveat: the number of distinct stored records can fall short of the
    /// requested count, through random key collisions and the repeated
    /// sentinel overwrite. Callers get a lower bound only; the one firm
    /// guarantee is that the sentinel record exists after the load.
    Random,
}

/// Loads a corpus into the store, optionally fanning out over workers.
#[derive(Debug, Clone, Copy)]
pub struct Loader {
    workers: usize,
    scheme: KeyScheme,
}

impl Loader {
    /// A loader with the default scheme for the worker count: contiguous
    /// keys for a single worker, random keys for a concurrent fan-out.
    pub fn new(workers: usize) -> Self {
        let scheme = if workers > 1 {
            KeyScheme::Random
        } else {
            KeyScheme::Contiguous
        };
        Loader::with_scheme(workers, scheme)
    }

    pub fn with_scheme(workers: usize, scheme: KeyScheme) -> Self {
        Loader {
            workers: workers.max(1),
            scheme,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn scheme(&self) -> KeyScheme {
        self.scheme
    }

    /// Populate the store with `plan.total_keys` records, blocking until
    /// every worker has flushed its batch.
    pub async fn load(&self, factory: Arc<dyn StoreFactory>, plan: LoadPlan) -> Result<()> {
        if plan.total_keys == 0 {
            return Ok(());
        }

        match self.scheme {
            KeyScheme::Contiguous => self.load_contiguous(factory, plan).await,
            KeyScheme::Random => self.load_random(factory, plan).await,
        }
    }

    async fn load_contiguous(&self, factory: Arc<dyn StoreFactory>, plan: LoadPlan) -> Result<()> {
        let ranges = partition_ranges(plan.total_keys, self.workers);

        if self.workers == 1 {
            let mut store = factory.open().await?;
            for range in ranges {
                write_range(store.as_mut(), &plan, range).await?;
            }
            return Ok(());
        }

        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, range) in ranges.into_iter().enumerate() {
            let factory = Arc::clone(&factory);
            handles.push(tokio::spawn(async move {
                log::debug!(
                    "loader worker {worker}: staging keys {}..{}",
                    range.start,
                    range.end
                );
                let mut store = factory.open().await?;
                write_range(store.as_mut(), &plan, range).await
            }));
        }

        for result in futures::future::join_all(handles).await {
            result??;
        }
        Ok(())
    }

    async fn load_random(&self, factory: Arc<dyn StoreFactory>, plan: LoadPlan) -> Result<()> {
        let counts = partition_counts(plan.total_keys, self.workers);

        let mut handles = Vec::with_capacity(counts.len());
        for (worker, count) in counts.into_iter().enumerate() {
            let factory = Arc::clone(&factory);
            handles.push(tokio::spawn(async move {
                log::debug!("loader worker {worker}: staging {count} random-key records");
                let mut store = factory.open().await?;
                write_random(store.as_mut(), &plan, count).await
            }));
        }

        for result in futures::future::join_all(handles).await {
            result??;
        }
        Ok(())
    }
}

/// Split a record count over workers; the first worker absorbs the
/// remainder of integer division.
pub fn partition_counts(total_keys: u64, workers: usize) -> Vec<u64> {
    let workers = workers.max(1);
    let base = total_keys / workers as u64;
    let mut counts = vec![base; workers];
    counts[0] += total_keys % workers as u64;
    counts
}

/// Contiguous key ranges matching [`partition_counts`]: disjoint, in order,
/// and covering `[0, total_keys)` exactly once.
pub fn partition_ranges(total_keys: u64, workers: usize) -> Vec<Range<u64>> {
    let counts = partition_counts(total_keys, workers);
    let mut ranges = Vec::with_capacity(counts.len());
    let mut start = 0u64;
    for count in counts {
        ranges.push(start..start + count);
        start += count;
    }
    ranges
}

async fn write_range(
    store: &mut dyn DocumentStore,
    plan: &LoadPlan,
    range: Range<u64>,
) -> Result<()> {
    let records: Vec<Record> = {
        let mut rng = rand::rng();
        range
            .map(|key| {
                random_record(
                    &mut rng,
                    key,
                    plan.num_fields,
                    plan.data_kind,
                    plan.text_len,
                    plan.numeric_len,
                )
            })
            .collect()
    };

    store.write_batch(plan.encoding, &records).await
}

async fn write_random(store: &mut dyn DocumentStore, plan: &LoadPlan, count: u64) -> Result<()> {
    if count == 0 {
        return Ok(());
    }

    let records: Vec<Record> = {
        let mut rng = rand::rng();
        let mut records: Vec<Record> = (0..count)
            .map(|_| {
                let key = rng.random::<u64>();
                random_record(
                    &mut rng,
                    key,
                    plan.num_fields,
                    plan.data_kind,
                    plan.text_len,
                    plan.numeric_len,
                )
            })
            .collect();

        // The sentinel is staged last so it survives as a well-formed record
        // no matter which worker's batch lands first.
        if let Some(last) = records.last() {
            let mut sentinel = last.clone();
            sentinel.key = SENTINEL_KEY;
            records.push(sentinel);
        }
        records
    };

    store.write_batch(plan.encoding, &records).await
}
