//! Ingestion errors.

use serde::Serialize;

use super::error_code::{self, RegshiftErrorCode};
use crate::types::SourceLayer;

/// Why a single raw record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MalformedReason {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("pair_index is not a non-negative integer: {0}")]
    InvalidPairIndex(String),

    #[error("event_type is not a string")]
    InvalidEventType,
}

/// Errors raised while turning raw diff records into events.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Per-record fault. Collected, never propagated on its own.
    #[error("Malformed {layer} record #{index}: {reason}")]
    MalformedRecord {
        layer: SourceLayer,
        index: usize,
        reason: MalformedReason,
    },

    #[error(
        "Ingestion of {layer} records aborted: {rejected} of {total} rejected \
         (rate {rate:.3} > ceiling {ceiling:.3}); {accepted} accepted"
    )]
    IngestionAborted {
        layer: SourceLayer,
        accepted: usize,
        rejected: usize,
        total: usize,
        rate: f64,
        ceiling: f64,
    },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in {path} at line {line}: {message}")]
    ParseFailed {
        path: String,
        line: usize,
        message: String,
    },
}

impl RegshiftErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => error_code::MALFORMED_RECORD,
            Self::IngestionAborted { .. } => error_code::INGESTION_ABORTED,
            Self::ReadFailed { .. } | Self::ParseFailed { .. } => error_code::INGEST_ERROR,
        }
    }
}
