//! Report data model and result aggregation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatch::Outcome;

/// One provider's benchmark outcome, as reported by the runner.
///
/// `ttft` is only meaningful for streaming outputs; for non-text modes
/// `output` holds a placeholder rather than generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    /// Display identifier for the provider/model combination
    pub model: String,
    /// Time to response, seconds
    pub ttr: f64,
    /// Time to first token, seconds
    pub ttft: f64,
    /// Tokens per second
    pub tps: f64,
    /// Generated token count
    pub num_tokens: u64,
    /// Total wall time, seconds
    pub total_time: f64,
    /// Generated text, or a placeholder for non-text modes
    pub output: String,
}

/// The aggregate report for one suite run. Immutable after assembly;
/// consumed by one render call and at most one persistence call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// ISO-8601 timestamp captured once at run start
    pub time: String,
    /// Process-location label (e.g. the hosting region), "local" when unset
    pub region: String,
    /// Audit reconstruction of the options applied to this run, stored
    /// verbatim and never reparsed
    pub cmd: String,
    /// Successful results in roster order; failed targets are omitted
    pub results: Vec<BenchResult>,
}

/// Joins dispatcher outcomes into a report.
///
/// Walks `outcomes` in roster order; failed targets are dropped from the
/// report (partial-provider failure is expected and must not block the
/// providers that did succeed) and logged with their reason. The result list
/// is therefore never longer than the roster.
pub fn aggregate(outcomes: Vec<Outcome>, time: String, region: String, cmd: String) -> RunReport {
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => warn!("dropping {}: {}", failure.model, failure.reason),
        }
    }
    RunReport {
        time,
        region,
        cmd,
        results,
    }
}
