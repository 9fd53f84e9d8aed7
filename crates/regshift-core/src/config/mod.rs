//! Configuration system for regshift.
//! TOML-based, 3-layer resolution: CLI > env > project > defaults.

pub mod analysis_config;
pub mod ingest_config;
pub mod regshift_config;

pub use analysis_config::AnalysisConfig;
pub use ingest_config::IngestConfig;
pub use regshift_config::{CliOverrides, RegshiftConfig};
