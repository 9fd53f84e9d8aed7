//! Shared constants for the regshift engine.

/// regshift version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default determinism threshold (inclusive) for a pattern's dominant outcome share.
pub const DEFAULT_DETERMINISM_THRESHOLD: f64 = 0.95;

/// Default rule-count milestones for the coverage-by-rule-count table.
pub const DEFAULT_RULE_MILESTONES: [usize; 7] = [10, 50, 100, 500, 1000, 2000, 5000];

/// Default coverage targets, in percent.
pub const DEFAULT_COVERAGE_TARGETS: [u32; 5] = [50, 70, 80, 90, 95];

/// Default ceiling on the fraction of rejected records per source.
pub const DEFAULT_MAX_REJECTION_RATE: f64 = 0.25;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "regshift.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "REGSHIFT_LOG";

/// Granularity names, coarsest first.
pub const GRANULARITY_NAMES: [&str; 4] = ["minimal", "lexical", "syntactic", "full"];
