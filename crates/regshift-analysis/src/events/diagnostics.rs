//! Ingestion diagnostics and the tree-edit distance summary.

use std::collections::BTreeMap;
use std::fmt;

use regshift_core::errors::MalformedReason;
use regshift_core::types::{FxHashMap, SourceLayer};
use serde::Serialize;

use super::types::{EditEvent, EventInstance};
use crate::stats::compute_mean_stddev;

/// One rejected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRejection {
    /// Position of the record in its source collection.
    pub index: usize,
    pub reason: MalformedReason,
}

/// Per-source tally of what happened to each raw record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestDiagnostics {
    pub layer: SourceLayer,
    pub total_records: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Records with a well-formed but unrecognized `event_type`.
    pub unknown_event_types: usize,
    pub unknown_by_type: BTreeMap<String, usize>,
    /// Records whose distance value was present but unusable.
    pub numeric_parse_skipped: usize,
    /// Records whose `position` was present but not a known class.
    pub unrecognized_positions: usize,
    pub rejections: Vec<RecordRejection>,
}

impl IngestDiagnostics {
    pub fn new(layer: SourceLayer) -> Self {
        Self {
            layer,
            total_records: 0,
            accepted: 0,
            rejected: 0,
            unknown_event_types: 0,
            unknown_by_type: BTreeMap::new(),
            numeric_parse_skipped: 0,
            unrecognized_positions: 0,
            rejections: Vec::new(),
        }
    }

    /// Rejected / total, 0 for an empty source.
    pub fn rejection_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.rejected as f64 / self.total_records as f64
        }
    }

    pub(crate) fn record_unknown(&mut self, raw_event_type: &str) {
        self.unknown_event_types += 1;
        *self
            .unknown_by_type
            .entry(raw_event_type.to_string())
            .or_insert(0) += 1;
    }

    pub(crate) fn record_rejection(&mut self, index: usize, reason: MalformedReason) {
        self.rejected += 1;
        self.rejections.push(RecordRejection { index, reason });
    }
}

impl fmt::Display for IngestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IngestDiagnostics {{ layer={}, total={}, accepted={}, rejected={}, unknown={}, numeric_skipped={}, unrecognized_positions={}, rejection_rate={:.1}% }}",
            self.layer,
            self.total_records,
            self.accepted,
            self.rejected,
            self.unknown_event_types,
            self.numeric_parse_skipped,
            self.unrecognized_positions,
            self.rejection_rate() * 100.0,
        )
    }
}

/// Distribution of tree-edit distances over distinct sentence pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSummary {
    /// Distinct pairs carrying a distance.
    pub pairs: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl DistanceSummary {
    /// Summarize the distance side-channel of `events`.
    ///
    /// A pair may repeat its distance on every record; the largest value
    /// reported for a pair is used. Returns `None` when no event carries one.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EventInstance>) -> Option<Self> {
        let mut per_pair: FxHashMap<u64, f64> = FxHashMap::default();
        for event in events {
            if let Some(distance) = event.distance() {
                per_pair
                    .entry(event.pair_index())
                    .and_modify(|d| *d = d.max(distance))
                    .or_insert(distance);
            }
        }
        if per_pair.is_empty() {
            return None;
        }

        let mut values: Vec<f64> = per_pair.into_values().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let (mean, stddev) = compute_mean_stddev(&values);

        Some(Self {
            pairs: values.len(),
            mean,
            stddev,
            min: values[0],
            max: values[values.len() - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{ConstituencyEvent, DependencyEvent, EventCategory};

    fn with_distance(pair: u64, distance: Option<f64>) -> EventInstance {
        ConstituencyEvent {
            tree_edit_distance: distance,
            ..ConstituencyEvent::new(pair, EventCategory::ConstWordsRemoved)
        }
        .into()
    }

    #[test]
    fn summary_counts_each_pair_once() {
        let events = vec![
            with_distance(1, Some(4.0)),
            with_distance(1, Some(4.0)),
            with_distance(2, Some(2.0)),
            with_distance(3, None),
            DependencyEvent::new(4, EventCategory::DepTokensAdded).into(),
        ];
        let summary = DistanceSummary::from_events(&events).unwrap();
        assert_eq!(summary.pairs, 2);
        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn summary_absent_without_distances() {
        let events = vec![with_distance(1, None)];
        assert!(DistanceSummary::from_events(&events).is_none());
    }

    #[test]
    fn rejection_rate_of_empty_source_is_zero() {
        let diag = IngestDiagnostics::new(SourceLayer::Dependency);
        assert_eq!(diag.rejection_rate(), 0.0);
    }
}
