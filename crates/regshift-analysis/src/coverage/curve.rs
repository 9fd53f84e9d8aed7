//! Coverage-by-rule-count table.

use serde::Serialize;

use super::ranking::CumulativeCoverage;
use crate::stats::percentage;

/// Coverage reached by the top `rules` patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub rules: usize,
    pub events_covered: u64,
    pub coverage_pct: f64,
    pub deterministic_rules: usize,
}

/// One row per milestone. Milestones beyond the pattern count are clipped
/// to it, and rows that collapse onto the same rule count are emitted once.
pub fn coverage_by_rule_count(cum: &CumulativeCoverage, milestones: &[usize]) -> Vec<CoverageRow> {
    let mut rule_counts: Vec<usize> = milestones.iter().map(|m| (*m).min(cum.len())).collect();
    rule_counts.sort_unstable();
    rule_counts.dedup();

    let total = cum.total_events();
    rule_counts
        .into_iter()
        .map(|rules| {
            let events_covered = cum.events_covered(rules);
            CoverageRow {
                rules,
                events_covered,
                coverage_pct: percentage(events_covered, total),
                deterministic_rules: cum.deterministic_rules(rules),
            }
        })
        .collect()
}
