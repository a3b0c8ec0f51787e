//! # Searchbench
//!
//! A benchmark harness that measures the memory footprint of RediSearch
//! secondary indexes built over synthetically generated records.
//!
//! ## Features
//!
//! - Hash (flat field map) and JSON (nested document) record encodings
//! - Text, tag, and numeric index fields, sortable or unsorted
//! - Parallel, pipelined data loading
//! - Completion polling with truncated exponential backoff
//! - Text, HTML, and markdown result tables

pub mod cli;
pub mod datagen;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod schema;
pub mod store;
pub mod suite;

pub mod prelude {}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
