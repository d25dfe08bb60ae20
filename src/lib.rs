//! # LLM Benchmark Suite Library
//!
//! A concurrent benchmark suite for hosted LLM serving endpoints. For a
//! chosen mode (text, image, audio, video) the suite expands a hand-curated
//! roster of provider/model/endpoint combinations, benchmarks every entry
//! concurrently through an external runner, and assembles the per-endpoint
//! timing metrics into one ordered report.
//!
//! ## Architecture Overview
//!
//! - `registry`: per-mode roster tables and the credential snapshot
//! - `resolve`: merges roster entries with run options into final argv sets
//! - `dispatch`: the fan-out/join core - one tokio task per target, joined
//!   in roster order, with a single failure never aborting siblings
//! - `results`: report data model and aggregation
//! - `format`: fixed-width table and JSON renderings
//! - `store`: optional report persistence behind the `BlobStore` trait
//! - `runner`: the external-process `Runner` implementation
//! - `suite`: orchestration tying the above together
//! - `cli`: command-line surface
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use llm_bench::{
//!     cli::{Mode, OutputKind},
//!     registry::Credentials,
//!     runner::CommandRunner,
//!     suite::{SuiteConfig, SuiteRunner},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = SuiteConfig::new(Mode::Text);
//!     config.format = OutputKind::Json;
//!     config.filter = Some("gpt-4".to_string());
//!
//!     let suite = SuiteRunner::new(
//!         config,
//!         Credentials::from_env(),
//!         "local".to_string(),
//!         Arc::new(CommandRunner::new("llm_benchmark")),
//!     );
//!     let (report, _media_type) = suite.run().await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! Only an unrecognized mode string is fatal, and it fails before anything
//! is dispatched. Everything downstream degrades to "fewer results than
//! requested": a target that errors, panics, or times out is dropped from
//! the report (and logged), and a persistence failure never corrupts the
//! in-memory report.

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod registry;
pub mod resolve;
pub mod results;
pub mod runner;
pub mod store;
pub mod suite;

pub use cli::{Args, Mode, OutputKind};
pub use dispatch::{dispatch, InvocationFailure, Outcome, Runner};
pub use error::{Error, Result};
pub use registry::{build_roster, Credentials, TargetConfig};
pub use resolve::{resolve, ResolvedInvocation, SharedOptions};
pub use results::{aggregate, BenchResult, RunReport};
pub use store::{BlobStore, DirStore};
pub use suite::{SuiteConfig, SuiteRunner};

/// The current version of the benchmark suite, used in logs for
/// reproducibility.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values.
pub mod defaults {
    /// Characters of each generation response shown in the tabular report.
    pub const DISPLAY_LENGTH: usize = 64;

    /// Bucket reports are stored under when persistence is requested.
    pub const BUCKET: &str = "thefastest-data";

    /// Region label recorded when the environment provides none.
    pub const REGION: &str = "local";

    /// Environment variable carrying the process-location label.
    pub const REGION_VAR: &str = "FLY_REGION";

    /// External benchmark binary invoked once per roster entry.
    pub const RUNNER_PROGRAM: &str = "llm_benchmark";
}
