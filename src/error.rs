//! Error types for the searchbench library.
//!
//! All errors are represented by the [`SearchBenchError`] enum. Store
//! communication failures are fatal to the current run and propagate
//! immediately; an index that is merely not yet built is not an error and
//! never surfaces here (see [`crate::index::poller`]).

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for searchbench operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for creating specific error types.
#[derive(Error, Debug)]
pub enum SearchBenchError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store communication errors
    #[error("Store error: {0}")]
    Store(String),

    /// Errors returned by the Redis client
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Schema-related errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid benchmark configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Task join errors from the parallel loader
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SearchBenchError.
pub type Result<T> = std::result::Result<T, SearchBenchError>;

impl SearchBenchError {
    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        SearchBenchError::Store(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SearchBenchError::Index(msg.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        SearchBenchError::Schema(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SearchBenchError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SearchBenchError::Other(msg.into())
    }
}
