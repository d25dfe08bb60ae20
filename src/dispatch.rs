//! Fan-out dispatcher: runs one benchmark invocation per roster entry
//! concurrently and joins them in roster order.
//!
//! Every invocation is spawned as its own tokio task before any handle is
//! awaited, so no invocation waits on another. A failure in one branch (error
//! return, panic, or timeout) never cancels or delays its siblings; the join
//! always waits for every branch to settle. There is deliberately no
//! concurrency cap: rosters are tens of entries, not thousands, and
//! per-provider throttling is the runner's concern.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::resolve::ResolvedInvocation;
use crate::results::BenchResult;

/// One target's failure. Recovered locally by the aggregator; never surfaced
/// as a run-level error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{model}: {reason}")]
pub struct InvocationFailure {
    pub model: String,
    pub reason: String,
}

/// What one invocation settled to.
pub type Outcome = Result<BenchResult, InvocationFailure>;

/// Executes a single resolved benchmark invocation.
///
/// The one shared resource across in-flight invocations: implementations
/// must be safely callable concurrently and own any per-provider throttling.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn benchmark(&self, invocation: ResolvedInvocation) -> Outcome;
}

/// Launches one task per invocation, then joins them in input order.
///
/// Returns one outcome per input, same order. `timeout`, when set, bounds
/// each invocation individually; a branch that misses its deadline settles as
/// a failed outcome without affecting branches that already settled or are
/// still running.
pub async fn dispatch(
    runner: Arc<dyn Runner>,
    invocations: Vec<ResolvedInvocation>,
    timeout: Option<Duration>,
) -> Vec<Outcome> {
    debug!("dispatching {} invocations", invocations.len());

    let handles: Vec<(String, JoinHandle<Outcome>)> = invocations
        .into_iter()
        .map(|invocation| {
            let runner = Arc::clone(&runner);
            let model = invocation.model.clone();
            let task_model = model.clone();
            let handle = tokio::spawn(async move {
                match timeout {
                    Some(limit) => {
                        match tokio::time::timeout(limit, runner.benchmark(invocation)).await {
                            Ok(outcome) => outcome,
                            Err(_) => Err(InvocationFailure {
                                model: task_model,
                                reason: format!("timed out after {:?}", limit),
                            }),
                        }
                    }
                    None => runner.benchmark(invocation).await,
                }
            });
            (model, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (model, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            // A panicked branch is a failed invocation, not a failed run.
            Err(join_err) => Err(InvocationFailure {
                model,
                reason: format!("task aborted: {}", join_err),
            }),
        };
        outcomes.push(outcome);
    }
    outcomes
}
