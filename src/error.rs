use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for healthdash startup.
///
/// Probe failures never surface here; they are recorded in the
/// [`ProbeResult`](crate::ProbeResult) of the affected target.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// No target was given on the command line or in the target file.
    #[error("no targets supplied")]
    NoTargets,
    /// Invalid interval, timeout, threshold or count.
    #[error("invalid settings: {0}")]
    Settings(String),
    /// Target file could not be read.
    #[error("cannot read target file '{}': {source}", .path.display())]
    TargetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// HTTP client could not be constructed.
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
    /// Cycle could not be serialized.
    #[cfg(feature = "json")]
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
