//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COVERAGE_TARGETS, DEFAULT_DETERMINISM_THRESHOLD, DEFAULT_RULE_MILESTONES,
    GRANULARITY_NAMES,
};

/// Configuration for pattern aggregation and coverage analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dominant-outcome share at or above which a pattern is deterministic. Default: 0.95.
    pub determinism_threshold: Option<f64>,
    /// Rule-count milestones for the coverage table. Default: 10..5000.
    #[serde(default)]
    pub rule_milestones: Vec<usize>,
    /// Coverage targets in percent. Default: 50, 70, 80, 90, 95.
    #[serde(default)]
    pub coverage_targets: Vec<u32>,
    /// Granularities to analyze. Default: all four.
    #[serde(default)]
    pub granularities: Vec<String>,
    /// Truncate `ranked_patterns` in the output. Statistics always use the full list.
    pub max_ranked_patterns: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective determinism threshold, defaulting to 0.95.
    pub fn effective_determinism_threshold(&self) -> f64 {
        self.determinism_threshold
            .unwrap_or(DEFAULT_DETERMINISM_THRESHOLD)
    }

    /// Milestones sorted ascending and deduplicated.
    pub fn effective_rule_milestones(&self) -> Vec<usize> {
        let mut milestones = if self.rule_milestones.is_empty() {
            DEFAULT_RULE_MILESTONES.to_vec()
        } else {
            self.rule_milestones.clone()
        };
        milestones.sort_unstable();
        milestones.dedup();
        milestones
    }

    /// Targets sorted ascending and deduplicated.
    pub fn effective_coverage_targets(&self) -> Vec<u32> {
        let mut targets = if self.coverage_targets.is_empty() {
            DEFAULT_COVERAGE_TARGETS.to_vec()
        } else {
            self.coverage_targets.clone()
        };
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Granularity names in coarse-to-fine order, deduplicated.
    pub fn effective_granularities(&self) -> Vec<&'static str> {
        GRANULARITY_NAMES
            .iter()
            .copied()
            .filter(|name| {
                self.granularities.is_empty()
                    || self.granularities.iter().any(|g| g.eq_ignore_ascii_case(name))
            })
            .collect()
    }
}
