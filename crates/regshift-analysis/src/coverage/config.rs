//! Explicit analyzer parameters.

use regshift_core::config::AnalysisConfig;
use regshift_core::constants::{
    DEFAULT_COVERAGE_TARGETS, DEFAULT_DETERMINISM_THRESHOLD, DEFAULT_RULE_MILESTONES,
};

use crate::context::Granularity;

/// Parameters for one analysis run, resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConfig {
    /// Inclusive lower bound on confidence for a deterministic pattern.
    pub determinism_threshold: f64,
    /// Ascending, deduplicated.
    pub rule_milestones: Vec<usize>,
    /// Ascending, deduplicated, in percent.
    pub coverage_targets: Vec<u32>,
    /// Coarse to fine.
    pub granularities: Vec<Granularity>,
    pub max_ranked_patterns: Option<usize>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            determinism_threshold: DEFAULT_DETERMINISM_THRESHOLD,
            rule_milestones: DEFAULT_RULE_MILESTONES.to_vec(),
            coverage_targets: DEFAULT_COVERAGE_TARGETS.to_vec(),
            granularities: Granularity::ALL.to_vec(),
            max_ranked_patterns: None,
        }
    }
}

impl From<&AnalysisConfig> for CoverageConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            determinism_threshold: config.effective_determinism_threshold(),
            rule_milestones: config.effective_rule_milestones(),
            coverage_targets: config.effective_coverage_targets(),
            granularities: Granularity::from_names(config.effective_granularities()),
            max_ranked_patterns: config.max_ranked_patterns,
        }
    }
}
