//! Pattern types.

use std::collections::BTreeMap;

use crate::context::{ContextKey, Granularity};
use crate::events::types::EventCategory;

/// All events sharing one context key at one granularity.
///
/// Derived fields are computed once when the aggregation pass finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub granularity: Granularity,
    pub context_key: ContextKey,
    pub event_type: EventCategory,
    /// Number of events mapped here. Always equals the sum of `outcome_counts`.
    pub instances: u64,
    pub outcome_counts: BTreeMap<String, u64>,
    /// Most frequent outcome; ties go to the lexicographically smallest.
    pub dominant_value: String,
    /// `max(outcome_counts) / instances`.
    pub confidence: f64,
    /// `confidence >= threshold`, inclusive.
    pub is_deterministic: bool,
}

impl Pattern {
    pub(crate) fn finalize(
        granularity: Granularity,
        context_key: ContextKey,
        event_type: EventCategory,
        outcome_counts: BTreeMap<String, u64>,
        threshold: f64,
    ) -> Self {
        let instances: u64 = outcome_counts.values().sum();

        // BTreeMap iterates in key order, so keeping the first maximum
        // picks the smallest outcome on ties.
        let mut dominant: Option<(&String, u64)> = None;
        for (value, count) in &outcome_counts {
            if dominant.map_or(true, |(_, best)| *count > best) {
                dominant = Some((value, *count));
            }
        }
        let (dominant_value, dominant_count) = dominant
            .map(|(v, c)| (v.clone(), c))
            .unwrap_or_default();

        let confidence = if instances == 0 {
            0.0
        } else {
            dominant_count as f64 / instances as f64
        };

        Self {
            granularity,
            context_key,
            event_type,
            instances,
            outcome_counts,
            dominant_value,
            confidence,
            is_deterministic: instances > 0 && confidence >= threshold,
        }
    }

    /// Number of events whose outcome differs from the dominant one.
    pub fn exceptions(&self) -> u64 {
        self.instances
            - self
                .outcome_counts
                .get(&self.dominant_value)
                .copied()
                .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextBuilder, Granularity};
    use crate::events::types::{DependencyEvent, EventInstance};

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn key() -> ContextKey {
        let event: EventInstance =
            DependencyEvent::new(0, EventCategory::DepTokensRemoved).into();
        ContextBuilder::build(&event, Granularity::Minimal)
    }

    fn finalize(pairs: &[(&str, u64)], threshold: f64) -> Pattern {
        Pattern::finalize(
            Granularity::Minimal,
            key(),
            EventCategory::DepTokensRemoved,
            counts(pairs),
            threshold,
        )
    }

    #[test]
    fn threshold_is_inclusive() {
        let p = finalize(&[("deleted", 285), ("retained", 15)], 0.95);
        assert_eq!(p.instances, 300);
        assert_eq!(p.confidence, 0.95);
        assert!(p.is_deterministic);
        assert_eq!(p.exceptions(), 15);
    }

    #[test]
    fn just_below_threshold_is_probabilistic() {
        let p = finalize(&[("deleted", 284), ("retained", 16)], 0.95);
        assert!(!p.is_deterministic);
    }

    #[test]
    fn dominant_tie_goes_to_smallest_value() {
        let p = finalize(&[("retained", 50), ("deleted", 50)], 0.95);
        assert_eq!(p.dominant_value, "deleted");
        assert_eq!(p.confidence, 0.5);
    }

    #[test]
    fn zero_threshold_makes_everything_deterministic() {
        let p = finalize(&[("a", 1), ("b", 1), ("c", 1)], 0.0);
        assert!(p.is_deterministic);
    }
}
