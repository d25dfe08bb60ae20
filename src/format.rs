//! Report rendering.
//!
//! Two renderings share one data contract: a lossless JSON document and a
//! fixed-width markdown table. The table's column widths and numeric
//! precision are a compatibility surface (downstream consumers parse rows),
//! so they are pinned by tests and must not drift.

use crate::cli::OutputKind;
use crate::error::Result;
use crate::results::{BenchResult, RunReport};

pub const MEDIA_JSON: &str = "application/json";
pub const MEDIA_MARKDOWN: &str = "text/markdown";

/// Renders `report` in the requested output kind, returning the rendered
/// text and its media type. `display_length` bounds the Response column in
/// the tabular rendering and is ignored for JSON.
pub fn render(
    report: &RunReport,
    kind: OutputKind,
    display_length: usize,
) -> Result<(String, &'static str)> {
    match kind {
        OutputKind::Json => Ok((serde_json::to_string_pretty(report)?, MEDIA_JSON)),
        OutputKind::Text => Ok((render_table(report, display_length), MEDIA_MARKDOWN)),
    }
}

fn render_table(report: &RunReport, dlen: usize) -> String {
    let mut s = String::new();
    s.push_str("| Provider/Model                             | TTR  | TTFT | TPS | Tok | Total |");
    s.push_str(&format!(" {:<dlen$.dlen$} |\n", "Response"));
    s.push_str("| :----------------------------------------- | ---: | ---: | --: | --: | ----: |");
    s.push_str(&format!(" {:-<dlen$.dlen$} |\n", ":--"));

    for r in &report.results {
        s.push_str(&render_row(r, dlen));
    }

    s.push_str(&format!(
        "\ntime: {}, region: {}, cmd: {}\n",
        report.time, report.region, report.cmd
    ));
    s
}

fn render_row(r: &BenchResult, dlen: usize) -> String {
    format!(
        "| {:<42} | {:4.2} | {:4.2} | {:3.0} | {:3} | {:5.2} | {:<dlen$.dlen$} |\n",
        r.model,
        r.ttr,
        r.ttft,
        r.tps,
        r.num_tokens,
        r.total_time,
        clip(&r.output),
    )
}

/// Replaces embedded newlines with the visible two-character `\n` escape and
/// trims, keeping rows single-line. Truncation/padding to the display width
/// happens in the row format.
fn clip(output: &str) -> String {
    output.replace('\n', "\\n").trim().to_string()
}
