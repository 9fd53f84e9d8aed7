//! Raw diff records → typed `EventInstance`s.
//!
//! Partial-failure semantics: a bad record is rejected on its own and the
//! rest of the source keeps flowing. Only a rejection rate above the
//! configured ceiling aborts the source.

use regshift_core::config::IngestConfig;
use regshift_core::errors::{IngestError, MalformedReason};
use regshift_core::types::SourceLayer;
use serde_json::{Map, Value};

use super::diagnostics::{DistanceSummary, IngestDiagnostics};
use super::mapping::categorize;
use super::record::{self, NumericField, RawRecord};
use super::types::{ConstituencyEvent, DependencyEvent, EventCategory, EventInstance, PositionClass};

/// Events and diagnostics for one source layer.
#[derive(Debug, Clone)]
pub struct LayerExtraction {
    pub events: Vec<EventInstance>,
    pub diagnostics: IngestDiagnostics,
}

/// Events from both layers, dependency events first, each in record order.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub events: Vec<EventInstance>,
    pub dependency: IngestDiagnostics,
    pub constituency: IngestDiagnostics,
    pub distance: Option<DistanceSummary>,
}

/// Outcome of reading a single record.
enum RecordOutcome {
    Accepted(EventInstance),
    Unknown(String),
}

/// Converts raw records into events under a rejection-rate ceiling.
#[derive(Debug, Clone)]
pub struct EventExtractor {
    max_rejection_rate: f64,
}

impl EventExtractor {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            max_rejection_rate: config.effective_max_rejection_rate(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }

    /// Extract both sources. Either source exceeding the ceiling fails the call.
    pub fn extract_all(
        &self,
        dependency: &[RawRecord],
        constituency: &[RawRecord],
    ) -> Result<Extraction, IngestError> {
        let dep = self.extract(SourceLayer::Dependency, dependency)?;
        let cons = self.extract(SourceLayer::Constituency, constituency)?;

        let mut events = dep.events;
        events.extend(cons.events);
        let distance = DistanceSummary::from_events(&events);

        Ok(Extraction {
            events,
            dependency: dep.diagnostics,
            constituency: cons.diagnostics,
            distance,
        })
    }

    /// Extract one source layer.
    pub fn extract(
        &self,
        layer: SourceLayer,
        records: &[RawRecord],
    ) -> Result<LayerExtraction, IngestError> {
        let mut diagnostics = IngestDiagnostics::new(layer);
        diagnostics.total_records = records.len();
        let mut events = Vec::with_capacity(records.len());

        for (index, raw) in records.iter().enumerate() {
            match Self::read_record(layer, raw, &mut diagnostics) {
                Ok(RecordOutcome::Accepted(event)) => {
                    diagnostics.accepted += 1;
                    events.push(event);
                }
                Ok(RecordOutcome::Unknown(event_type)) => {
                    tracing::trace!(%layer, index, event_type = %event_type, "unknown event type dropped");
                    diagnostics.record_unknown(&event_type);
                }
                Err(reason) => {
                    let err = IngestError::MalformedRecord {
                        layer,
                        index,
                        reason: reason.clone(),
                    };
                    tracing::debug!(error = %err, "record rejected");
                    diagnostics.record_rejection(index, reason);
                }
            }
        }

        let rate = diagnostics.rejection_rate();
        if rate > self.max_rejection_rate {
            tracing::warn!(
                %layer,
                accepted = diagnostics.accepted,
                rejected = diagnostics.rejected,
                rate,
                ceiling = self.max_rejection_rate,
                "rejection rate over ceiling, aborting source"
            );
            return Err(IngestError::IngestionAborted {
                layer,
                accepted: diagnostics.accepted,
                rejected: diagnostics.rejected,
                total: diagnostics.total_records,
                rate,
                ceiling: self.max_rejection_rate,
            });
        }

        if diagnostics.rejected > 0
            || diagnostics.unknown_event_types > 0
            || diagnostics.unrecognized_positions > 0
        {
            tracing::warn!(%diagnostics, "ingestion finished with dropped records");
        } else {
            tracing::debug!(%diagnostics, "ingestion finished");
        }

        Ok(LayerExtraction { events, diagnostics })
    }

    fn read_record(
        layer: SourceLayer,
        raw: &RawRecord,
        diagnostics: &mut IngestDiagnostics,
    ) -> Result<RecordOutcome, MalformedReason> {
        let fields = record::as_object(raw)?;
        let pair_index = record::pair_index(fields)?;
        let event_type = record::event_type(fields)?;

        let Some(category) = categorize(layer, event_type) else {
            return Ok(RecordOutcome::Unknown(event_type.to_string()));
        };

        let position = position(fields, diagnostics);
        let event = match layer {
            SourceLayer::Dependency => {
                let (distance, skipped) = Self::distance(fields, &["distance"]);
                if skipped {
                    diagnostics.numeric_parse_skipped += 1;
                }
                Self::dependency_event(fields, pair_index, category, position, distance).into()
            }
            SourceLayer::Constituency => {
                let (distance, skipped) =
                    Self::distance(fields, &["tree_edit_distance", "distance"]);
                if skipped {
                    diagnostics.numeric_parse_skipped += 1;
                }
                Self::constituency_event(fields, pair_index, category, position, distance).into()
            }
        };
        Ok(RecordOutcome::Accepted(event))
    }

    /// Best-effort numeric read: `(value, was_skipped)`.
    fn distance(fields: &Map<String, Value>, names: &[&str]) -> (Option<f64>, bool) {
        match record::numeric(fields, names) {
            NumericField::Absent => (None, false),
            NumericField::Value(v) => (Some(v), false),
            NumericField::Unparsable => {
                tracing::trace!(fields = ?names, "unparsable distance ignored");
                (None, true)
            }
        }
    }

    fn dependency_event(
        fields: &Map<String, Value>,
        pair_index: u64,
        category: EventCategory,
        position: Option<PositionClass>,
        distance: Option<f64>,
    ) -> DependencyEvent {
        let upos = record::text(fields, &["upos", "pos"]);
        let proper_noun = proper_noun(fields, upos.as_deref());
        DependencyEvent {
            pair_index,
            category,
            form: record::text(fields, &["form"]),
            lemma: record::text(fields, &["lemma"]),
            feats: record::text(fields, &["feats"]).and_then(|f| record::normalize_features(&f)),
            deprel: record::text(fields, &["deprel"]),
            head_upos: record::text(fields, &["head_upos", "parent_pos"]),
            position,
            proper_noun,
            old_value: record::text(fields, &["old_value"]),
            new_value: record::text(fields, &["new_value"]),
            outcome: record::text(fields, &["outcome"]),
            distance,
            upos,
        }
    }

    fn constituency_event(
        fields: &Map<String, Value>,
        pair_index: u64,
        category: EventCategory,
        position: Option<PositionClass>,
        distance: Option<f64>,
    ) -> ConstituencyEvent {
        let pos = record::text(fields, &["pos", "tag"]);
        let proper_noun = proper_noun(fields, pos.as_deref());
        ConstituencyEvent {
            pair_index,
            category,
            word: record::text(fields, &["word", "form"]),
            lemma: record::text(fields, &["lemma"]),
            label: record::text(fields, &["label"]),
            parent_label: record::text(fields, &["parent_label"]),
            position,
            proper_noun,
            old_value: record::text(fields, &["old_value"]),
            new_value: record::text(fields, &["new_value"]),
            outcome: record::text(fields, &["outcome"]),
            tree_edit_distance: distance,
            pos,
        }
    }
}

/// Explicit flag first, then the POS tag, then unknown.
fn proper_noun(fields: &Map<String, Value>, pos: Option<&str>) -> Option<bool> {
    record::flag(fields, &["is_proper_noun"]).or_else(|| pos.map(record::proper_noun_from_pos))
}

/// Unrecognized values are left unspecified and counted, so records they
/// merge with a position-less key stay visible in the diagnostics.
fn position(
    fields: &Map<String, Value>,
    diagnostics: &mut IngestDiagnostics,
) -> Option<PositionClass> {
    let raw = record::text(fields, &["position"])?;
    let parsed = PositionClass::parse(&raw);
    if parsed.is_none() {
        tracing::trace!(position = %raw, "unrecognized position class treated as unspecified");
        diagnostics.unrecognized_positions += 1;
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::EditEvent;
    use serde_json::json;

    #[test]
    fn dependency_record_is_fully_typed() {
        let records = vec![json!({
            "pair_index": 4,
            "event_type": "tokens_removed",
            "form": "the",
            "lemma": "the",
            "upos": "DET",
            "feats": "PronType=Art|Definite=Def",
            "deprel": "det",
            "head_upos": "NOUN",
            "position": "Before"
        })];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Dependency, &records)
            .unwrap();
        assert_eq!(out.events.len(), 1);
        let event = &out.events[0];
        assert_eq!(event.category(), EventCategory::DepTokensRemoved);
        assert_eq!(event.features(), Some("Definite=Def|PronType=Art"));
        assert_eq!(event.position(), Some(PositionClass::Before));
        assert_eq!(event.is_proper_noun(), Some(false));
        assert_eq!(event.outcome(), "deleted");
    }

    #[test]
    fn unknown_event_types_are_counted_not_rejected() {
        let records = vec![
            json!({"pair_index": 1, "event_type": "tokens_added"}),
            json!({"pair_index": 1, "event_type": "sentence_split"}),
            json!({"pair_index": 2, "event_type": "sentence_split"}),
        ];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Dependency, &records)
            .unwrap();
        assert_eq!(out.diagnostics.accepted, 1);
        assert_eq!(out.diagnostics.rejected, 0);
        assert_eq!(out.diagnostics.unknown_event_types, 2);
        assert_eq!(out.diagnostics.unknown_by_type.get("sentence_split"), Some(&2));
    }

    #[test]
    fn malformed_records_are_rejected_individually() {
        let mut records: Vec<RawRecord> = (0..9)
            .map(|i| json!({"pair_index": i, "event_type": "word_added"}))
            .collect();
        records.push(json!({"event_type": "word_added"}));
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Constituency, &records)
            .unwrap();
        assert_eq!(out.diagnostics.accepted, 9);
        assert_eq!(out.diagnostics.rejected, 1);
        assert_eq!(out.diagnostics.rejections[0].index, 9);
        assert_eq!(
            out.diagnostics.rejections[0].reason,
            MalformedReason::MissingField("pair_index".into())
        );
    }

    #[test]
    fn rejection_rate_over_ceiling_aborts_source() {
        let records = vec![
            json!({"pair_index": 0, "event_type": "word_added"}),
            json!({"pair_index": "x", "event_type": "word_added"}),
            json!("not an object"),
        ];
        let err = EventExtractor::with_defaults()
            .extract(SourceLayer::Constituency, &records)
            .unwrap_err();
        match err {
            IngestError::IngestionAborted {
                accepted, rejected, total, ..
            } => {
                assert_eq!((accepted, rejected, total), (1, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rate_exactly_at_ceiling_is_tolerated() {
        let config = IngestConfig {
            max_rejection_rate: Some(0.5),
        };
        let records = vec![
            json!({"pair_index": 0, "event_type": "word_added"}),
            json!({"pair_index": -3, "event_type": "word_added"}),
        ];
        let out = EventExtractor::new(&config)
            .extract(SourceLayer::Constituency, &records)
            .unwrap();
        assert_eq!(out.diagnostics.accepted, 1);
    }

    #[test]
    fn unparsable_distance_keeps_the_event() {
        let records = vec![
            json!({"pair_index": 0, "event_type": "word_removed", "tree_edit_distance": "n/a"}),
            json!({"pair_index": 1, "event_type": "word_removed", "tree_edit_distance": "3"}),
        ];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Constituency, &records)
            .unwrap();
        assert_eq!(out.events.len(), 2);
        assert_eq!(out.diagnostics.numeric_parse_skipped, 1);
        assert_eq!(out.events[0].distance(), None);
        assert_eq!(out.events[1].distance(), Some(3.0));
    }

    #[test]
    fn unrecognized_positions_are_counted() {
        let records = vec![
            json!({"pair_index": 0, "event_type": "tokens_removed", "position": "elsewhere"}),
            json!({"pair_index": 1, "event_type": "tokens_removed", "position": "AFTER"}),
            json!({"pair_index": 2, "event_type": "tokens_removed"}),
        ];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Dependency, &records)
            .unwrap();
        assert_eq!(out.events.len(), 3);
        assert_eq!(out.events[0].position(), None);
        assert_eq!(out.events[1].position(), Some(PositionClass::After));
        assert_eq!(out.diagnostics.unrecognized_positions, 1);
    }

    #[test]
    fn empty_text_stays_distinct_from_missing() {
        let records = vec![
            json!({"pair_index": 0, "event_type": "tokens_removed", "lemma": "", "feats": ""}),
            json!({"pair_index": 1, "event_type": "tokens_removed", "lemma": "_"}),
        ];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Dependency, &records)
            .unwrap();
        assert_eq!(out.events[0].lemma_or_form(), Some(""));
        assert_eq!(out.events[0].features(), Some(""));
        assert_eq!(out.events[1].lemma_or_form(), None);
    }

    #[test]
    fn proper_noun_flag_derived_from_tag() {
        let records = vec![
            json!({"pair_index": 0, "event_type": "word_removed", "tag": "NNP", "word": "Obama"}),
            json!({"pair_index": 0, "event_type": "word_removed", "tag": "NNP", "is_proper_noun": false}),
            json!({"pair_index": 0, "event_type": "word_removed"}),
        ];
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Constituency, &records)
            .unwrap();
        assert_eq!(out.events[0].is_proper_noun(), Some(true));
        assert_eq!(out.events[1].is_proper_noun(), Some(false));
        assert_eq!(out.events[2].is_proper_noun(), None);
    }

    #[test]
    fn extract_all_merges_layers_and_summarizes_distance() {
        let dependency = vec![json!({"pair_index": 0, "event_type": "tokens_added"})];
        let constituency = vec![
            json!({"pair_index": 0, "event_type": "word_added", "tree_edit_distance": 6}),
            json!({"pair_index": 1, "event_type": "word_added", "tree_edit_distance": 2}),
        ];
        let out = EventExtractor::with_defaults()
            .extract_all(&dependency, &constituency)
            .unwrap();
        assert_eq!(out.events.len(), 3);
        assert_eq!(out.events[0].layer(), SourceLayer::Dependency);
        assert_eq!(out.distance.unwrap().pairs, 2);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let out = EventExtractor::with_defaults()
            .extract(SourceLayer::Dependency, &[])
            .unwrap();
        assert!(out.events.is_empty());
        assert_eq!(out.diagnostics.total_records, 0);
    }
}
