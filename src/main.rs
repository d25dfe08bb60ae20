//! Entry point for the LLM benchmark suite CLI.
//!
//! Thin by design: parse flags, snapshot the environment (credentials and
//! region) once, hand everything to [`SuiteRunner`], and print whatever
//! rendering it returns. All orchestration lives in the library.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::debug;

use llm_bench::{
    cli::Args,
    logging::SuiteFormatter,
    registry::Credentials,
    runner::CommandRunner,
    store::DirStore,
    suite::{SuiteConfig, SuiteRunner},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Log level is controlled via RUST_LOG; default to info so benchmark
    // progress is visible without flags.
    tracing_subscriber::fmt()
        .event_format(SuiteFormatter)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    debug!("llm-bench {} starting: {:?}", llm_bench::VERSION, args);

    // Environment is read exactly once, here; the core never touches it.
    let credentials = Credentials::from_env();
    let region = std::env::var(llm_bench::defaults::REGION_VAR)
        .unwrap_or_else(|_| llm_bench::defaults::REGION.to_string());

    let config = SuiteConfig::from_args(&args);
    let mut suite = SuiteRunner::new(
        config,
        credentials,
        region,
        Arc::new(CommandRunner::new(&args.runner)),
    );
    if args.store {
        suite = suite.with_store(Arc::new(DirStore::new(&args.store_root)));
    }

    let (text, _media_type) = suite.run().await?;
    println!("{text}");
    Ok(())
}
