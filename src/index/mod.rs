//! Index lifecycle: create, await background construction, measure, drop.

pub mod lifecycle;
pub mod poller;

pub use lifecycle::{INDEX_NAME, IndexLifecycle, IndexStats};
pub use poller::{CompletionPoller, MAX_BACKOFF, Sleeper, TokioSleeper, backoff_delay};
