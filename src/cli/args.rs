//! Command line argument parsing for the searchbench CLI using clap.
//!
//! Every numeric parameter is range-validated by its value parser, so
//! out-of-range input is rejected with a usage error before any store
//! connection is attempted.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::suite::{BenchConfig, default_workers};

/// Searchbench - compares the memory footprint of index structures
#[derive(Parser, Debug, Clone)]
#[command(name = "searchbench")]
#[command(about = "Measures RediSearch index memory across record encodings and field types")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SearchBenchArgs {
    /// Redis URL connect string
    #[arg(long, default_value = "redis://localhost:6379")]
    pub url: String,

    /// Number of unique keys to be created and indexed
    #[arg(
        long,
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..=1_000_000),
        value_name = "[1,1000000]"
    )]
    pub nkeys: u64,

    /// Number of fields per key
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=1_000),
        value_name = "[1,1000]"
    )]
    pub nfields: u64,

    /// Size (characters) of text fields
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=1_000),
        value_name = "[1,1000]"
    )]
    pub textsize: u64,

    /// Size (digits) of numeric fields
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=15),
        value_name = "[1,15]"
    )]
    pub numericsize: u64,

    /// Number of concurrent workers used for data loading
    #[arg(
        long,
        default_value_t = default_nprocesses(),
        value_parser = clap::value_parser!(u64).range(1..=100),
        value_name = "[1,100]"
    )]
    pub nprocesses: u64,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: OutputFormat,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

fn default_nprocesses() -> u64 {
    default_workers() as u64
}

impl SearchBenchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The benchmark parameters these arguments describe.
    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            num_keys: self.nkeys,
            num_fields: self.nfields as usize,
            text_len: self.textsize as usize,
            numeric_len: self.numericsize as usize,
            workers: self.nprocesses as usize,
        }
    }
}

/// Output formats for the result table.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain aligned-column table
    Text,
    /// HTML table
    Html,
    /// Markdown table
    Markdown,
}
