//! Rule-induction engine over sentence-pair edit events.
//!
//! Dependency and constituency diff records are turned into typed events,
//! grouped by context key at four granularities, and each pattern population
//! is ranked to answer how many rules cover how much of the data.
//!
//! ```text
//! records ─▶ events::EventExtractor ─▶ context::ContextBuilder
//!         ─▶ patterns::PatternAggregator ─▶ coverage::CoverageAnalyzer
//! ```

pub mod context;
pub mod coverage;
pub mod events;
pub mod io;
pub mod patterns;
pub mod pipeline;
pub mod stats;

pub use context::{ContextBuilder, ContextKey, Granularity};
pub use coverage::{CoverageAnalyzer, CoverageConfig, CoverageReport};
pub use events::{EventExtractor, EventInstance, RawRecord};
pub use patterns::{Pattern, PatternAggregator};
pub use pipeline::{analyze, analyze_with_cancellation, AnalysisReport, RuleInductionPipeline};
