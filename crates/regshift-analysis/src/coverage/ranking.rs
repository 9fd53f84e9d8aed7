//! Pattern ranking and the cumulative sums every coverage query reads.

use std::cmp::Ordering;

use crate::patterns::Pattern;

/// Frequency descending, then context key ascending.
pub fn rank_order(a: &Pattern, b: &Pattern) -> Ordering {
    b.instances
        .cmp(&a.instances)
        .then_with(|| a.context_key.cmp(&b.context_key))
        .then_with(|| a.event_type.cmp(&b.event_type))
}

/// Sort patterns into rank order. The result depends only on the pattern
/// multiset, never on the order the aggregator produced them in.
pub fn rank_patterns(mut patterns: Vec<Pattern>) -> Vec<Pattern> {
    patterns.sort_by(rank_order);
    patterns
}

/// Prefix sums over a ranked list: entry `n` covers the top `n` rules.
#[derive(Debug, Clone)]
pub struct CumulativeCoverage {
    events: Vec<u64>,
    deterministic: Vec<usize>,
}

impl CumulativeCoverage {
    pub fn new(ranked: &[Pattern]) -> Self {
        let mut events = Vec::with_capacity(ranked.len() + 1);
        let mut deterministic = Vec::with_capacity(ranked.len() + 1);
        events.push(0);
        deterministic.push(0);
        let (mut e, mut d) = (0u64, 0usize);
        for p in ranked {
            e += p.instances;
            if p.is_deterministic {
                d += 1;
            }
            events.push(e);
            deterministic.push(d);
        }
        Self {
            events,
            deterministic,
        }
    }

    /// Number of ranked patterns.
    pub fn len(&self) -> usize {
        self.events.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_events(&self) -> u64 {
        self.events[self.len()]
    }

    /// Events covered by the top `n` rules; `n` is clipped to the list length.
    pub fn events_covered(&self, n: usize) -> u64 {
        self.events[n.min(self.len())]
    }

    /// Deterministic patterns among the top `n`; `n` is clipped.
    pub fn deterministic_rules(&self, n: usize) -> usize {
        self.deterministic[n.min(self.len())]
    }
}
