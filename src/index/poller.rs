//! Completion polling with truncated exponential backoff.
//!
//! Background indexing finishes at the store's own pace; the poller re-reads
//! the index status until the reported fraction reaches 100%, sleeping
//! between checks. Delays double per attempt up to a cap (1s, 2s, 4s, 8s,
//! 8s, ...). There is no retry limit: the loop is unbounded in time and
//! relies on eventual completion; callers needing a hard deadline must wrap
//! the call externally.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::{DocumentStore, IndexStatus};

/// Cap on the backoff exponent: delays never exceed `2^MAX_BACKOFF` seconds.
pub const MAX_BACKOFF: u32 = 3;

/// The delay before the next status check, `2^min(attempt, MAX_BACKOFF)`
/// seconds.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt.min(MAX_BACKOFF))
}

/// Suspends the polling loop between checks. The production implementation
/// is [`TokioSleeper`]; tests inject a recording fake instead.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Waits for an index to finish background construction.
pub struct CompletionPoller {
    sleeper: Box<dyn Sleeper>,
}

impl Default for CompletionPoller {
    fn default() -> Self {
        CompletionPoller::new()
    }
}

impl CompletionPoller {
    pub fn new() -> Self {
        CompletionPoller {
            sleeper: Box::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(sleeper: Box<dyn Sleeper>) -> Self {
        CompletionPoller { sleeper }
    }

    /// Poll `index_name` until the store reports the corpus fully indexed,
    /// returning the final status (which carries the size components needed
    /// for measurement). Never returns a status below 100%.
    pub async fn await_indexed(
        &self,
        store: &mut dyn DocumentStore,
        index_name: &str,
    ) -> Result<IndexStatus> {
        let mut attempt: u32 = 0;
        let mut status = store.index_status(index_name).await?;

        while !status.is_complete() {
            let delay = backoff_delay(attempt);
            log::debug!(
                "index '{index_name}' at {:.0}%, next check in {}s",
                status.percent_indexed * 100.0,
                delay.as_secs()
            );
            self.sleeper.sleep(delay).await;
            attempt = (attempt + 1).min(MAX_BACKOFF);
            status = store.index_status(index_name).await?;
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_then_truncates() {
        let delays: Vec<u64> = (0..7).map(|c| backoff_delay(c).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 8, 8, 8]);
    }
}
