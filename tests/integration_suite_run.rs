//! End-to-end suite runs against a stub runner: the image-mode roster
//! filtered to "gemini" yields exactly two targets, one of which succeeds
//! and one of which fails.

use async_trait::async_trait;
use std::sync::Arc;

use llm_bench::{
    cli::{Mode, OutputKind},
    dispatch::{InvocationFailure, Outcome, Runner},
    registry::Credentials,
    resolve::ResolvedInvocation,
    results::{BenchResult, RunReport},
    suite::{SuiteConfig, SuiteRunner},
};

/// Succeeds for gemini-pro-vision with fixed metrics, fails everything else.
struct StubRunner;

#[async_trait]
impl Runner for StubRunner {
    async fn benchmark(&self, invocation: ResolvedInvocation) -> Outcome {
        if invocation.model == "gemini-pro-vision" {
            Ok(BenchResult {
                model: invocation.model,
                ttr: 0.31,
                ttft: 0.62,
                tps: 100.0,
                num_tokens: 50,
                total_time: 1.25,
                output: "a photo of a cat".to_string(),
            })
        } else {
            Err(InvocationFailure {
                model: invocation.model,
                reason: "simulated provider outage".to_string(),
            })
        }
    }
}

fn suite(format: OutputKind) -> SuiteRunner {
    let mut config = SuiteConfig::new(Mode::Image);
    config.format = format;
    config.filter = Some("gemini".to_string());
    SuiteRunner::new(
        config,
        Credentials::new(),
        "test-region".to_string(),
        Arc::new(StubRunner),
    )
}

#[tokio::test]
async fn structured_output_contains_only_the_successful_target() {
    let (text, media_type) = suite(OutputKind::Json).run().await.unwrap();
    assert_eq!(media_type, "application/json");

    let report: RunReport = serde_json::from_str(&text).unwrap();
    assert_eq!(report.region, "test-region");
    assert_eq!(report.results.len(), 1);

    let result = &report.results[0];
    assert_eq!(result.model, "gemini-pro-vision");
    assert_eq!(result.tps, 100.0);
    assert_eq!(result.num_tokens, 50);
    assert_eq!(result.total_time, 1.25);
}

#[tokio::test]
async fn tabular_output_has_one_data_row_with_exact_columns() {
    let (text, media_type) = suite(OutputKind::Text).run().await.unwrap();
    assert_eq!(media_type, "text/markdown");

    let rows: Vec<&str> = text
        .lines()
        .skip(2)
        .filter(|l| l.starts_with('|'))
        .collect();
    assert_eq!(rows.len(), 1, "only the successful target gets a row");

    let row = rows[0];
    assert!(row.contains("| 100 |"), "TPS column: {row}");
    assert!(row.contains("|  1.25 |"), "Total column: {row}");
    assert!(row.contains("gemini-pro-vision"));
    assert!(text.contains("region: test-region"));
}

#[tokio::test]
async fn fully_failed_run_still_reports() {
    let mut config = SuiteConfig::new(Mode::Audio); // roster has no gemini-pro-vision
    config.format = OutputKind::Json;
    let suite = SuiteRunner::new(
        config,
        Credentials::new(),
        "test-region".to_string(),
        Arc::new(StubRunner),
    );

    let (text, _) = suite.run().await.unwrap();
    let report: RunReport = serde_json::from_str(&text).unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.region, "test-region");
}

#[tokio::test]
async fn empty_filtered_roster_is_not_an_error() {
    let mut config = SuiteConfig::new(Mode::Image);
    config.format = OutputKind::Json;
    config.filter = Some("no-such-model".to_string());
    let suite = SuiteRunner::new(
        config,
        Credentials::new(),
        "test-region".to_string(),
        Arc::new(StubRunner),
    );

    let (text, _) = suite.run().await.unwrap();
    let report: RunReport = serde_json::from_str(&text).unwrap();
    assert!(report.results.is_empty());
}
