use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when a run session is created with incomplete parameters.
///
/// These are checked before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("missing credential: {0} must be set")]
    MissingCredential(&'static str),

    #[error("missing input: {0} must not be empty")]
    MissingInput(&'static str),

    #[error("link limit {limit} is out of range (expected 1..={max})")]
    InvalidLimit { limit: u32, max: u32 },
}

/// Errors returned by the CSV/JSON exporters.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
