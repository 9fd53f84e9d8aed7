//! Per-granularity coverage report.

use std::collections::BTreeMap;

use serde::Serialize;

use super::curve::CoverageRow;
use super::targets::TargetRow;
use crate::context::{Granularity, KeyComponent};
use crate::events::types::EventCategory;
use crate::patterns::Pattern;

/// Output view of one ranked pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPattern {
    pub context_key: Vec<KeyComponent>,
    pub event_type: EventCategory,
    pub instances: u64,
    pub is_deterministic: bool,
    pub dominant_value: String,
    pub confidence: f64,
}

impl RankedPattern {
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            context_key: pattern
                .context_key
                .components(pattern.granularity.attributes()),
            event_type: pattern.event_type,
            instances: pattern.instances,
            is_deterministic: pattern.is_deterministic,
            dominant_value: pattern.dominant_value.clone(),
            confidence: pattern.confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub granularity: Granularity,
    pub total_patterns: usize,
    pub total_events: u64,
    /// Deterministic patterns as a percentage of all patterns.
    pub deterministic_percentage: f64,
    /// Possibly truncated for output; every statistic uses the full list.
    pub ranked_patterns: Vec<RankedPattern>,
    pub coverage_by_rule_count: Vec<CoverageRow>,
    pub rules_for_target_coverage: Vec<TargetRow>,
    pub events_per_type: BTreeMap<EventCategory, u64>,
}

impl CoverageReport {
    /// Rules needed for `target_pct`, if it was among the configured targets
    /// and is reachable.
    pub fn rules_for(&self, target_pct: u32) -> Option<usize> {
        self.rules_for_target_coverage
            .iter()
            .find(|row| row.target_pct == target_pct)
            .and_then(|row| row.rules.reached())
    }
}
