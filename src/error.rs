//! Centralized error types for mediaplan.
//!
//! The resolver itself is total and never fails; these errors cover the
//! tooling around it (descriptor files, configuration, CLI output).

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mediaplan library.
#[derive(Error, Debug)]
pub enum PlanError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified descriptor file does not exist.
    #[error("Descriptor file not found: {0}")]
    FileNotFound(PathBuf),

    /// JSON error tied to a specific descriptor line.
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    /// An unknown output format was requested.
    #[error("Unknown output format '{0}'. Supported: json, table")]
    InvalidFormat(String),
}

/// Convenience alias for `Result<T, PlanError>`.
pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `PlanError`
/// when no path context is available (rare — prefer `PlanError::io`).
impl From<std::io::Error> for PlanError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
