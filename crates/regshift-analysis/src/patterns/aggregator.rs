//! Pattern Aggregator — single-pass hash grouping of events by context key.
//!
//! O(N) in events, O(distinct keys) in memory. Outcome strings are only
//! allocated the first time a pattern sees them.

use std::collections::BTreeMap;
use std::fmt;

use regshift_core::types::collections::FxHashMap;
use serde::Serialize;

use super::types::Pattern;
use crate::context::{ContextBuilder, ContextKey, Granularity};
use crate::events::types::{EditEvent, EventCategory};

/// Running tally for one key during the pass.
struct Accumulator {
    event_type: EventCategory,
    outcomes: FxHashMap<String, u64>,
}

/// Groups events into patterns for one granularity.
#[derive(Debug, Clone, Copy)]
pub struct PatternAggregator {
    granularity: Granularity,
    threshold: f64,
}

/// Patterns for one granularity, in no particular order.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub granularity: Granularity,
    pub patterns: Vec<Pattern>,
    pub diagnostics: AggregationDiagnostics,
}

impl PatternAggregator {
    pub fn new(granularity: Granularity, threshold: f64) -> Self {
        Self {
            granularity,
            threshold,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Run the aggregation pass. Input order does not affect the result.
    pub fn aggregate<'a, E, I>(&self, events: I) -> PatternSet
    where
        E: EditEvent + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let mut groups: FxHashMap<ContextKey, Accumulator> = FxHashMap::default();

        for event in events {
            let key = ContextBuilder::build(event, self.granularity);
            let acc = groups.entry(key).or_insert_with(|| Accumulator {
                event_type: event.category(),
                outcomes: FxHashMap::default(),
            });
            let outcome = event.outcome();
            match acc.outcomes.get_mut(outcome) {
                Some(count) => *count += 1,
                None => {
                    acc.outcomes.insert(outcome.to_string(), 1);
                }
            }
        }

        let patterns: Vec<Pattern> = groups
            .into_iter()
            .map(|(key, acc)| {
                let outcome_counts: BTreeMap<String, u64> = acc.outcomes.into_iter().collect();
                Pattern::finalize(
                    self.granularity,
                    key,
                    acc.event_type,
                    outcome_counts,
                    self.threshold,
                )
            })
            .collect();

        let diagnostics = AggregationDiagnostics::compute(self.granularity, &patterns);
        tracing::debug!(%diagnostics, "aggregation pass complete");

        PatternSet {
            granularity: self.granularity,
            patterns,
            diagnostics,
        }
    }
}

impl PatternSet {
    pub fn total_events(&self) -> u64 {
        self.diagnostics.total_events
    }
}

/// Shape of one granularity's pattern population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationDiagnostics {
    pub granularity: Granularity,
    pub total_patterns: usize,
    pub total_events: u64,
    pub deterministic_patterns: usize,
    /// Patterns backed by a single event.
    pub singleton_patterns: usize,
    /// Events whose outcome differs from their pattern's dominant outcome.
    pub exception_events: u64,
    pub mean_instances: f64,
    pub events_per_type: BTreeMap<EventCategory, u64>,
}

impl AggregationDiagnostics {
    fn compute(granularity: Granularity, patterns: &[Pattern]) -> Self {
        let mut events_per_type: BTreeMap<EventCategory, u64> = BTreeMap::new();
        let mut total_events = 0u64;
        let mut deterministic_patterns = 0usize;
        let mut singleton_patterns = 0usize;
        let mut exception_events = 0u64;

        for p in patterns {
            total_events += p.instances;
            *events_per_type.entry(p.event_type).or_insert(0) += p.instances;
            if p.is_deterministic {
                deterministic_patterns += 1;
            }
            if p.instances == 1 {
                singleton_patterns += 1;
            }
            exception_events += p.exceptions();
        }

        let mean_instances = if patterns.is_empty() {
            0.0
        } else {
            total_events as f64 / patterns.len() as f64
        };

        Self {
            granularity,
            total_patterns: patterns.len(),
            total_events,
            deterministic_patterns,
            singleton_patterns,
            exception_events,
            mean_instances,
            events_per_type,
        }
    }
}

impl fmt::Display for AggregationDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AggregationDiagnostics {{ granularity={}, patterns={}, events={}, deterministic={}, singletons={}, exceptions={}, mean_instances={:.2} }}",
            self.granularity,
            self.total_patterns,
            self.total_events,
            self.deterministic_patterns,
            self.singleton_patterns,
            self.exception_events,
            self.mean_instances,
        )
    }
}
