//! Harness-level error type.
//!
//! The report core itself never fails (malformed payloads degrade to empty
//! view-models); errors exist only at the file/config boundary of the CLI.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesviewError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl SalesviewError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn config(path: &Path, message: String) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message,
        }
    }
}
