//! Run orchestrator: extract → (per granularity, in parallel) aggregate → analyze.

use rayon::prelude::*;
use regshift_core::config::RegshiftConfig;
use regshift_core::constants::VERSION;
use regshift_core::errors::AnalysisError;
use regshift_core::traits::{Cancellable, CancellationToken};
use serde::Serialize;

use crate::context::Granularity;
use crate::coverage::{CoverageAnalyzer, CoverageConfig, CoverageReport};
use crate::events::{DistanceSummary, EventExtractor, EventInstance, IngestDiagnostics, RawRecord};
use crate::patterns::{AggregationDiagnostics, PatternAggregator};

/// Aggregation + coverage across the configured granularities.
pub struct RuleInductionPipeline {
    analyzer: CoverageAnalyzer,
}

/// Reports in coarse-to-fine order, plus what was abandoned.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub reports: Vec<CoverageReport>,
    pub aggregation: Vec<AggregationDiagnostics>,
    pub skipped: Vec<Granularity>,
}

/// Outcome of one granularity's pass.
enum Pass {
    Done(Box<(CoverageReport, AggregationDiagnostics)>),
    Skipped(Granularity),
}

impl RuleInductionPipeline {
    pub fn new(config: CoverageConfig) -> Self {
        Self {
            analyzer: CoverageAnalyzer::new(config),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CoverageConfig::default())
    }

    pub fn config(&self) -> &CoverageConfig {
        self.analyzer.config()
    }

    /// Run every configured granularity to completion.
    pub fn run(&self, events: &[EventInstance]) -> PipelineResult {
        self.run_with_cancellation(events, &CancellationToken::never())
    }

    /// Run with cooperative cancellation. A granularity that observes the
    /// token before or after its aggregation pass is dropped and listed in
    /// `skipped`; the others still report.
    pub fn run_with_cancellation(
        &self,
        events: &[EventInstance],
        cancel: &dyn Cancellable,
    ) -> PipelineResult {
        let config = self.analyzer.config();

        let passes: Vec<Pass> = config
            .granularities
            .par_iter()
            .map(|&granularity| {
                if cancel.is_cancelled() {
                    return Pass::Skipped(granularity);
                }

                let set = PatternAggregator::new(granularity, config.determinism_threshold)
                    .aggregate(events);

                if cancel.is_cancelled() {
                    return Pass::Skipped(granularity);
                }

                let diagnostics = set.diagnostics;
                let report = self.analyzer.analyze(granularity, set.patterns);
                tracing::info!(
                    %granularity,
                    patterns = report.total_patterns,
                    events = report.total_events,
                    deterministic_pct = report.deterministic_percentage,
                    "granularity analyzed"
                );
                Pass::Done(Box::new((report, diagnostics)))
            })
            .collect();

        let mut result = PipelineResult {
            reports: Vec::with_capacity(passes.len()),
            aggregation: Vec::with_capacity(passes.len()),
            skipped: Vec::new(),
        };
        for pass in passes {
            match pass {
                Pass::Done(done) => {
                    let (report, diagnostics) = *done;
                    result.reports.push(report);
                    result.aggregation.push(diagnostics);
                }
                Pass::Skipped(granularity) => result.skipped.push(granularity),
            }
        }

        if !result.skipped.is_empty() {
            tracing::warn!(skipped = ?result.skipped, "granularities cancelled");
        }
        result
    }
}

/// The run document: every report plus how the input was read.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub version: &'static str,
    pub dependency: IngestDiagnostics,
    pub constituency: IngestDiagnostics,
    /// Absent when no record carried a distance.
    pub distance: Option<DistanceSummary>,
    pub aggregation: Vec<AggregationDiagnostics>,
    pub reports: Vec<CoverageReport>,
    pub skipped: Vec<Granularity>,
}

impl AnalysisReport {
    pub fn report(&self, granularity: Granularity) -> Option<&CoverageReport> {
        self.reports.iter().find(|r| r.granularity == granularity)
    }
}

/// Extract both sources and analyze them under `config`.
pub fn analyze(
    dependency: &[RawRecord],
    constituency: &[RawRecord],
    config: &RegshiftConfig,
) -> Result<AnalysisReport, AnalysisError> {
    analyze_with_cancellation(dependency, constituency, config, &CancellationToken::never())
}

/// As [`analyze`], failing with `Cancelled` if the token fires before any
/// granularity starts.
pub fn analyze_with_cancellation(
    dependency: &[RawRecord],
    constituency: &[RawRecord],
    config: &RegshiftConfig,
    cancel: &dyn Cancellable,
) -> Result<AnalysisReport, AnalysisError> {
    let extraction = EventExtractor::new(&config.ingest).extract_all(dependency, constituency)?;

    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let pipeline = RuleInductionPipeline::new(CoverageConfig::from(&config.analysis));
    let result = pipeline.run_with_cancellation(&extraction.events, cancel);

    Ok(AnalysisReport {
        version: VERSION,
        dependency: extraction.dependency,
        constituency: extraction.constituency,
        distance: extraction.distance,
        aggregation: result.aggregation,
        reports: result.reports,
        skipped: result.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<RawRecord> {
        vec![
            json!({"pair_index": 0, "event_type": "tokens_removed", "lemma": "the", "upos": "DET"}),
            json!({"pair_index": 1, "event_type": "tokens_removed", "lemma": "the", "upos": "DET"}),
            json!({"pair_index": 1, "event_type": "tokens_added", "lemma": "new", "upos": "ADJ"}),
        ]
    }

    #[test]
    fn reports_come_back_coarse_to_fine() {
        let report = analyze(&records(), &[], &RegshiftConfig::default()).unwrap();
        let order: Vec<Granularity> = report.reports.iter().map(|r| r.granularity).collect();
        assert_eq!(order, Granularity::ALL.to_vec());
        assert!(report.skipped.is_empty());
        assert_eq!(report.report(Granularity::Minimal).unwrap().total_events, 3);
    }

    #[test]
    fn cancelled_token_skips_every_granularity() {
        let token = CancellationToken::new();
        token.cancel();
        let pipeline = RuleInductionPipeline::with_defaults();
        let extraction = EventExtractor::with_defaults()
            .extract_all(&records(), &[])
            .unwrap();
        let result = pipeline.run_with_cancellation(&extraction.events, &token);
        assert!(result.reports.is_empty());
        assert_eq!(result.skipped, Granularity::ALL.to_vec());
    }

    #[test]
    fn cancelled_before_start_is_an_error() {
        let token = CancellationToken::new();
        token.cancel();
        let err = analyze_with_cancellation(&records(), &[], &RegshiftConfig::default(), &token)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Cancelled));
    }
}
