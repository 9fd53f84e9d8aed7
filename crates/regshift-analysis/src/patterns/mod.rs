//! Pattern Aggregator — events sharing a context key become one pattern.

pub mod aggregator;
pub mod types;

pub use aggregator::{AggregationDiagnostics, PatternAggregator, PatternSet};
pub use types::Pattern;
