use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// LLM Benchmark Suite - measures latency and throughput of hosted model endpoints
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Mode to run benchmarks for
    #[clap(short = 'm', long, value_enum, default_value_t = Mode::Text)]
    pub mode: Mode,

    /// Output results in the specified format
    #[clap(short = 'F', long = "format", value_enum, default_value_t = OutputKind::Text)]
    pub format: OutputKind,

    /// Filter models by name (case-sensitive substring match)
    #[clap(short = 'r', long)]
    pub filter: Option<String>,

    /// Amount of the generation response to display
    #[clap(short = 'l', long, default_value_t = crate::defaults::DISPLAY_LENGTH)]
    pub display_length: usize,

    /// Store the structured report in the configured bucket
    #[clap(long, default_value_t = false)]
    pub store: bool,

    /// Directory backing the blob store bucket layout
    #[clap(long, default_value = ".")]
    pub store_root: PathBuf,

    /// Bucket name for stored reports
    #[clap(long, default_value = crate::defaults::BUCKET)]
    pub bucket: String,

    /// Per-invocation timeout (e.g. "90s", "2m"); unset waits indefinitely
    #[clap(short = 't', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// External benchmark runner binary
    #[clap(long, default_value = crate::defaults::RUNNER_PROGRAM)]
    pub runner: PathBuf,

    /// Extra flags forwarded verbatim to the runner (after `--`)
    #[clap(last = true)]
    pub pass_args: Vec<String>,
}

/// Benchmark modes, each with its own model roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Text generation models
    #[clap(name = "text")]
    Text,

    /// Image understanding models
    #[clap(name = "image")]
    Image,

    /// Audio understanding models
    #[clap(name = "audio")]
    Audio,

    /// Video understanding models
    #[clap(name = "video")]
    Video,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Text => "text",
            Mode::Image => "image",
            Mode::Audio => "audio",
            Mode::Video => "video",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// Parses a mode name, failing with [`Error::UnknownMode`] for anything
    /// outside the four recognized values. This is the seam where string
    /// input from library callers is validated before any dispatch happens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Mode::Text),
            "image" => Ok(Mode::Image),
            "audio" => Ok(Mode::Audio),
            "video" => Ok(Mode::Video),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Report output renderings
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputKind {
    /// Fixed-width markdown table
    #[clap(name = "text")]
    Text,

    /// Lossless JSON document
    #[clap(name = "json")]
    Json,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Text => write!(f, "text"),
            OutputKind::Json => write!(f, "json"),
        }
    }
}

/// Parse duration from string (e.g. "500ms", "10s", "5m", "1h")
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Duration cannot be empty".to_string());
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, "s")
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, "m")
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, "h")
    } else {
        (s, "s") // Default to seconds
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number in duration: {}", num_str))?;

    let duration = match unit {
        "ms" => Duration::from_millis(num as u64),
        "s" => Duration::from_secs(num as u64),
        "m" => Duration::from_secs((num * 60.0) as u64),
        "h" => Duration::from_secs((num * 3600.0) as u64),
        _ => return Err(format!("Invalid duration unit: {}", unit)),
    };

    Ok(duration)
}
