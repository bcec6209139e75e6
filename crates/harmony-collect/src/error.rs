//! Collection error types.

use std::path::PathBuf;

use harmony_core::HarmonyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    /// Reading a schema source failed.
    #[error("I/O error while collecting schemas: {0}")]
    Io(#[from] std::io::Error),

    /// Walking a search path failed.
    #[error("Failed to walk schema search path: {0}")]
    Walk(#[from] ignore::Error),

    /// A discovered file is not valid JSON.
    #[error("Failed to parse schema file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<CollectError> for HarmonyError {
    fn from(error: CollectError) -> Self {
        Self::Collect {
            detail: error.to_string(),
        }
    }
}
