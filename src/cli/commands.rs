//! Command implementation for the searchbench CLI.

use std::sync::Arc;

use crate::cli::args::SearchBenchArgs;
use crate::cli::output;
use crate::error::Result;
use crate::store::{RedisFactory, StoreFactory};
use crate::suite::BenchSuite;

/// Run the full benchmark against the configured store and print the
/// result table.
pub async fn execute(args: SearchBenchArgs) -> Result<()> {
    let config = args.bench_config();
    let factory: Arc<dyn StoreFactory> = Arc::new(RedisFactory::new(args.url.clone()));

    log::info!(
        "loading {} keys x {} fields per group with {} workers",
        config.num_keys,
        config.num_fields,
        config.workers
    );

    let suite = BenchSuite::new(factory, config);
    let table = suite.run_all().await?;

    output::print_report(&args, &table);
    Ok(())
}
