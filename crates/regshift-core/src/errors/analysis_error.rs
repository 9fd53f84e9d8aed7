//! Top-level analysis errors.

use super::error_code::{self, RegshiftErrorCode};
use super::{ConfigError, IngestError};

/// Errors that can end an analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write report to {path}: {message}")]
    Output { path: String, message: String },

    #[error("Analysis cancelled")]
    Cancelled,
}

impl RegshiftErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ingest(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Output { .. } => error_code::OUTPUT_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
