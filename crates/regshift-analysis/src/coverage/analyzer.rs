//! Coverage Analyzer — ranking, coverage table, target search, report.

use std::collections::BTreeMap;

use super::config::CoverageConfig;
use super::curve::coverage_by_rule_count;
use super::ranking::{rank_patterns, CumulativeCoverage};
use super::report::{CoverageReport, RankedPattern};
use super::targets::rules_for_targets;
use crate::context::Granularity;
use crate::events::types::EventCategory;
use crate::patterns::Pattern;
use crate::stats::percentage;

/// Stateless over runs; all parameters come from the `CoverageConfig`.
#[derive(Debug, Clone, Default)]
pub struct CoverageAnalyzer {
    config: CoverageConfig,
}

impl CoverageAnalyzer {
    pub fn new(config: CoverageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Build the report for one granularity's patterns.
    pub fn analyze(&self, granularity: Granularity, patterns: Vec<Pattern>) -> CoverageReport {
        let ranked = rank_patterns(patterns);
        let cum = CumulativeCoverage::new(&ranked);
        let total_events = cum.total_events();

        if total_events == 0 {
            tracing::info!(%granularity, "no events; every coverage target is unreachable");
        }

        let deterministic = cum.deterministic_rules(cum.len());
        let coverage_by_rule_count = coverage_by_rule_count(&cum, &self.config.rule_milestones);
        let rules_for_target_coverage = rules_for_targets(&cum, &self.config.coverage_targets);

        let mut events_per_type: BTreeMap<EventCategory, u64> = BTreeMap::new();
        for p in &ranked {
            *events_per_type.entry(p.event_type).or_insert(0) += p.instances;
        }

        let shown = self
            .config
            .max_ranked_patterns
            .map_or(ranked.len(), |max| max.min(ranked.len()));
        let ranked_patterns = ranked[..shown]
            .iter()
            .map(RankedPattern::from_pattern)
            .collect();

        CoverageReport {
            granularity,
            total_patterns: ranked.len(),
            total_events,
            deterministic_percentage: percentage(deterministic as u64, ranked.len() as u64),
            ranked_patterns,
            coverage_by_rule_count,
            rules_for_target_coverage,
            events_per_type,
        }
    }
}
