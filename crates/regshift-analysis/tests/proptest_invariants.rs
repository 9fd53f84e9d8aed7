//! Property tests for the aggregation and coverage invariants.

use proptest::prelude::*;
use regshift_analysis::coverage::{CoverageAnalyzer, CoverageConfig, RuleCount};
use regshift_analysis::events::EventExtractor;
use regshift_analysis::{EventInstance, Granularity, PatternAggregator, RawRecord, RuleInductionPipeline};
use serde_json::json;

const EVENT_TYPES: [&str; 4] = ["tokens_removed", "tokens_added", "lemma_changed", "deprel_changed"];
const LEMMAS: [&str; 5] = ["the", "a", "of", "say", "_"];
const UPOS: [&str; 4] = ["DET", "ADP", "VERB", "PROPN"];
const DEPRELS: [&str; 3] = ["det", "case", "root"];
const OUTCOMES: [Option<&str>; 3] = [None, Some("deleted"), Some("retained")];
const POSITIONS: [&str; 4] = ["before", "within", "after", "elsewhere"];

fn record_strategy() -> impl Strategy<Value = RawRecord> {
    (
        0u64..50,
        0..EVENT_TYPES.len(),
        0..LEMMAS.len(),
        0..UPOS.len(),
        0..DEPRELS.len(),
        0..OUTCOMES.len(),
        0..POSITIONS.len(),
        any::<bool>(),
    )
        .prop_map(|(pair, ty, lemma, upos, deprel, outcome, position, with_feats)| {
            let mut record = json!({
                "pair_index": pair,
                "event_type": EVENT_TYPES[ty],
                "lemma": LEMMAS[lemma],
                "upos": UPOS[upos],
                "deprel": DEPRELS[deprel],
                "position": POSITIONS[position],
                "new_value": LEMMAS[(lemma + 1) % LEMMAS.len()],
            });
            if let Some(o) = OUTCOMES[outcome] {
                record["outcome"] = json!(o);
            }
            if with_feats {
                record["feats"] = json!("Number=Sing|Definite=Def");
            }
            record
        })
}

fn extract(records: &[RawRecord]) -> Vec<EventInstance> {
    EventExtractor::with_defaults()
        .extract(regshift_core::types::SourceLayer::Dependency, records)
        .unwrap()
        .events
}

proptest! {
    #[test]
    fn prop_conservation(records in prop::collection::vec(record_strategy(), 0..200)) {
        let events = extract(&records);
        for granularity in Granularity::ALL {
            let set = PatternAggregator::new(granularity, 0.95).aggregate(&events);
            let sum: u64 = set.patterns.iter().map(|p| p.instances).sum();
            prop_assert_eq!(sum, events.len() as u64);
            for p in &set.patterns {
                prop_assert_eq!(p.outcome_counts.values().sum::<u64>(), p.instances);
                prop_assert!(p.confidence > 0.0 && p.confidence <= 1.0);
            }
        }
    }

    #[test]
    fn prop_coverage_is_monotonic(records in prop::collection::vec(record_strategy(), 0..200)) {
        let events = extract(&records);
        let config = CoverageConfig {
            rule_milestones: (1..=40).collect(),
            coverage_targets: (1..=100).collect(),
            ..CoverageConfig::default()
        };
        let analyzer = CoverageAnalyzer::new(config);
        for granularity in Granularity::ALL {
            let set = PatternAggregator::new(granularity, 0.95).aggregate(&events);
            let report = analyzer.analyze(granularity, set.patterns);

            for w in report.coverage_by_rule_count.windows(2) {
                prop_assert!(w[0].rules < w[1].rules);
                prop_assert!(w[0].events_covered <= w[1].events_covered);
                prop_assert!(w[0].deterministic_rules <= w[1].deterministic_rules);
            }
            let mut last = 0usize;
            for row in &report.rules_for_target_coverage {
                match row.rules {
                    RuleCount::Reached(n) => {
                        prop_assert!(n >= last);
                        prop_assert!(n >= 1 && n <= report.total_patterns);
                        last = n;
                    }
                    RuleCount::Unreachable => prop_assert_eq!(report.total_events, 0),
                }
            }
        }
    }

    #[test]
    fn prop_refinement_never_merges(records in prop::collection::vec(record_strategy(), 0..200)) {
        let events = extract(&records);
        let counts: Vec<usize> = Granularity::ALL
            .iter()
            .map(|g| PatternAggregator::new(*g, 0.95).aggregate(&events).patterns.len())
            .collect();
        for w in counts.windows(2) {
            prop_assert!(w[0] <= w[1], "{:?}", counts);
        }
    }

    #[test]
    fn prop_shuffle_reproducible(
        (records, shuffled) in prop::collection::vec(record_strategy(), 0..150)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let pipeline = RuleInductionPipeline::with_defaults();
        let a = pipeline.run(&extract(&records));
        let b = pipeline.run(&extract(&shuffled));
        let a_json = serde_json::to_string(&a.reports).unwrap();
        let b_json = serde_json::to_string(&b.reports).unwrap();
        prop_assert_eq!(a_json, b_json);
    }
}
