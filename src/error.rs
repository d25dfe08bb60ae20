use thiserror::Error;

/// Errors produced by the benchmark suite core.
///
/// Only roster-construction errors are fatal to a run. Per-target failures
/// are represented by [`crate::dispatch::InvocationFailure`] and recovered by
/// the aggregator; they never surface through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested benchmark mode is not one of text/image/audio/video.
    #[error("unknown mode {0:?}")]
    UnknownMode(String),

    /// The blob store rejected or failed a write.
    #[error("store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
