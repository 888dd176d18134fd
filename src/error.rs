//! Error types for HealthMd

use thiserror::Error;

/// Errors that can occur while configuring an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
