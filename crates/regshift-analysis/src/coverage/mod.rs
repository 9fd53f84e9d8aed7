//! Coverage Analyzer — how many rules it takes to explain how much of the data.

pub mod analyzer;
pub mod config;
pub mod curve;
pub mod ranking;
pub mod report;
pub mod targets;

pub use analyzer::CoverageAnalyzer;
pub use config::CoverageConfig;
pub use curve::CoverageRow;
pub use report::{CoverageReport, RankedPattern};
pub use targets::{RuleCount, TargetRow};
