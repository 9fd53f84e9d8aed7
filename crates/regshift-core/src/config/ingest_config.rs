//! Ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_REJECTION_RATE;

/// Configuration for the event extractor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Fraction of rejected records above which a source is aborted. Default: 0.25.
    pub max_rejection_rate: Option<f64>,
}

impl IngestConfig {
    /// Returns the effective rejection ceiling, defaulting to 0.25.
    pub fn effective_max_rejection_rate(&self) -> f64 {
        self.max_rejection_rate.unwrap_or(DEFAULT_MAX_REJECTION_RATE)
    }
}
