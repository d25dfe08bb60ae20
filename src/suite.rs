//! Suite orchestration: ties the registry, configuration builder,
//! dispatcher, aggregator, formatter, and store together for one run.

use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::cli::{Args, Mode, OutputKind};
use crate::dispatch::{self, Runner};
use crate::error::Result;
use crate::format;
use crate::registry::{self, Credentials};
use crate::resolve::{self, SharedOptions};
use crate::results::{self, RunReport};
use crate::store::{self, BlobStore};

/// Configuration for one suite run.
#[derive(Clone, Debug)]
pub struct SuiteConfig {
    pub mode: Mode,
    pub format: OutputKind,
    pub display_length: usize,
    pub filter: Option<String>,
    pub store: bool,
    pub bucket: String,
    /// Per-invocation deadline; `None` waits for every branch indefinitely
    pub timeout: Option<Duration>,
    /// Run-wide options, lowest merge precedence
    pub shared: SharedOptions,
    /// Tokens forwarded verbatim to the runner, highest merge precedence
    pub pass_args: Vec<String>,
}

impl SuiteConfig {
    /// A minimal configuration with library defaults for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            format: OutputKind::Text,
            display_length: crate::defaults::DISPLAY_LENGTH,
            filter: None,
            store: false,
            bucket: crate::defaults::BUCKET.to_string(),
            timeout: None,
            shared: SharedOptions::new(),
            pass_args: Vec::new(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self {
            mode: args.mode,
            format: args.format,
            display_length: args.display_length,
            filter: args.filter.clone(),
            store: args.store,
            bucket: args.bucket.clone(),
            timeout: args.timeout,
            shared: SharedOptions::new(),
            pass_args: args.pass_args.clone(),
        }
    }
}

/// Executes complete benchmark runs: roster expansion, concurrent dispatch,
/// ordered aggregation, rendering, and optional persistence.
pub struct SuiteRunner {
    config: SuiteConfig,
    credentials: Credentials,
    region: String,
    runner: Arc<dyn Runner>,
    store: Option<Arc<dyn BlobStore>>,
}

impl SuiteRunner {
    pub fn new(
        config: SuiteConfig,
        credentials: Credentials,
        region: String,
        runner: Arc<dyn Runner>,
    ) -> Self {
        Self {
            config,
            credentials,
            region,
            runner,
            store: None,
        }
    }

    /// Attaches the blob store used when the configuration requests
    /// persistence.
    pub fn with_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Runs the whole suite once and returns the rendered report and its
    /// media type.
    ///
    /// Partial provider failure degrades to fewer results, never to an
    /// error; a run where every invocation failed still returns a
    /// well-formed empty report. A store failure is logged and does not
    /// affect the returned rendering.
    pub async fn run(&self) -> Result<(String, &'static str)> {
        let time = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let cmd = resolve::command_line(&self.config.shared, &self.config.pass_args);

        let roster = registry::build_roster(
            self.config.mode,
            self.config.filter.as_deref(),
            &self.credentials,
        );
        info!(
            "benchmarking {} targets in {} mode",
            roster.len(),
            self.config.mode
        );

        let invocations = roster
            .iter()
            .map(|target| resolve::resolve(target, &self.config.shared, &self.config.pass_args))
            .collect();
        let outcomes =
            dispatch::dispatch(Arc::clone(&self.runner), invocations, self.config.timeout).await;

        let report = results::aggregate(outcomes, time, self.region.clone(), cmd);
        info!(
            "{} of {} targets produced results",
            report.results.len(),
            roster.len()
        );

        if self.config.store {
            self.persist(&report).await;
        }

        format::render(&report, self.config.format, self.config.display_length)
    }

    /// Persists the structured rendering, regardless of the run's requested
    /// output kind. Failures are logged; the in-memory report is unaffected.
    async fn persist(&self, report: &RunReport) {
        let Some(blob_store) = &self.store else {
            warn!("persistence requested but no blob store is configured");
            return;
        };

        let key = store::report_key(&report.region, self.config.mode, &report.time);
        info!("storing results in {}/{}", self.config.bucket, key);
        match format::render(report, OutputKind::Json, self.config.display_length) {
            Ok((body, media_type)) => {
                if let Err(e) = blob_store
                    .put(&self.config.bucket, &key, body.as_bytes(), media_type)
                    .await
                {
                    error!("failed to store report: {e}");
                }
            }
            Err(e) => error!("failed to serialize report for storage: {e}"),
        }
    }
}
