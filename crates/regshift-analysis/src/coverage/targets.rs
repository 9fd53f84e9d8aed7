//! Minimal rule-set size for each coverage target.

use serde::{Serialize, Serializer};

use super::ranking::CumulativeCoverage;

/// Rules needed for a target, or `"unreachable"` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCount {
    Reached(usize),
    Unreachable,
}

impl RuleCount {
    pub fn reached(&self) -> Option<usize> {
        match self {
            Self::Reached(n) => Some(*n),
            Self::Unreachable => None,
        }
    }
}

impl Serialize for RuleCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reached(n) => serializer.serialize_u64(*n as u64),
            Self::Unreachable => serializer.serialize_str("unreachable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRow {
    pub target_pct: u32,
    pub rules: RuleCount,
    /// Deterministic patterns among the chosen rules; over the whole list
    /// when the target is unreachable.
    pub deterministic_rules: usize,
}

/// Smallest `N` whose cumulative coverage meets each target.
///
/// Compared as `covered * 100 >= target * total` so that a target hit
/// exactly is never missed to float rounding.
pub fn rules_for_targets(cum: &CumulativeCoverage, targets: &[u32]) -> Vec<TargetRow> {
    let total = cum.total_events();
    targets
        .iter()
        .map(|&target_pct| {
            let needed = u128::from(target_pct) * u128::from(total);
            let found = if total == 0 {
                None
            } else {
                // Cumulative sums are non-decreasing, so binary search finds the first hit.
                let n = partition_point(cum.len(), |n| {
                    u128::from(cum.events_covered(n)) * 100 < needed
                });
                (n <= cum.len()).then_some(n)
            };
            match found {
                Some(n) => TargetRow {
                    target_pct,
                    rules: RuleCount::Reached(n),
                    deterministic_rules: cum.deterministic_rules(n),
                },
                None => TargetRow {
                    target_pct,
                    rules: RuleCount::Unreachable,
                    deterministic_rules: cum.deterministic_rules(cum.len()),
                },
            }
        })
        .collect()
}

/// First `n` in `1..=len` for which `below(n)` is false, or `len + 1`.
fn partition_point(len: usize, below: impl Fn(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (1usize, len + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if below(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
