//! Searchbench CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use searchbench::cli::args::SearchBenchArgs;
use searchbench::cli::commands;

#[tokio::main]
async fn main() {
    // Parse command line arguments using clap
    let args = SearchBenchArgs::parse();

    // Set up logging/verbosity based on args
    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Info,  // Default: per-test progress
        2 => LevelFilter::Debug, // Verbose
        _ => LevelFilter::Trace, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Execute the benchmark
    if let Err(e) = commands::execute(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
