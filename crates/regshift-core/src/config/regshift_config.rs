//! Top-level regshift configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, IngestConfig};
use crate::constants::{GRANULARITY_NAMES, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`REGSHIFT_*`)
/// 3. Project config (`regshift.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegshiftConfig {
    pub ingest: IngestConfig,
    pub analysis: AnalysisConfig,
}

/// Override arguments supplied by a wrapping CLI.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_rejection_rate: Option<f64>,
    pub determinism_threshold: Option<f64>,
    pub coverage_targets: Option<Vec<u32>>,
    pub rule_milestones: Option<Vec<usize>>,
    pub granularities: Option<Vec<String>>,
    pub max_ranked_patterns: Option<usize>,
}

impl RegshiftConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (no layering).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RegshiftConfig) -> Result<(), ConfigError> {
        if let Some(rate) = config.ingest.max_rejection_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(invalid("ingest.max_rejection_rate", "must be between 0.0 and 1.0"));
            }
        }
        if let Some(threshold) = config.analysis.determinism_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(invalid(
                    "analysis.determinism_threshold",
                    "must be between 0.0 and 1.0",
                ));
            }
        }
        if config.analysis.coverage_targets.iter().any(|t| *t == 0 || *t > 100) {
            return Err(invalid("analysis.coverage_targets", "each target must be in 1..=100"));
        }
        if config.analysis.rule_milestones.contains(&0) {
            return Err(invalid("analysis.rule_milestones", "milestones must be positive"));
        }
        if let Some(unknown) = config
            .analysis
            .granularities
            .iter()
            .find(|g| !GRANULARITY_NAMES.iter().any(|n| n.eq_ignore_ascii_case(g)))
        {
            return Err(invalid(
                "analysis.granularities",
                &format!("unknown granularity `{unknown}`"),
            ));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RegshiftConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RegshiftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only values `other` actually sets win.
    fn merge(base: &mut RegshiftConfig, other: &RegshiftConfig) {
        if other.ingest.max_rejection_rate.is_some() {
            base.ingest.max_rejection_rate = other.ingest.max_rejection_rate;
        }

        if other.analysis.determinism_threshold.is_some() {
            base.analysis.determinism_threshold = other.analysis.determinism_threshold;
        }
        if !other.analysis.rule_milestones.is_empty() {
            base.analysis.rule_milestones = other.analysis.rule_milestones.clone();
        }
        if !other.analysis.coverage_targets.is_empty() {
            base.analysis.coverage_targets = other.analysis.coverage_targets.clone();
        }
        if !other.analysis.granularities.is_empty() {
            base.analysis.granularities = other.analysis.granularities.clone();
        }
        if other.analysis.max_ranked_patterns.is_some() {
            base.analysis.max_ranked_patterns = other.analysis.max_ranked_patterns;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `REGSHIFT_INGEST_MAX_REJECTION_RATE`, `REGSHIFT_ANALYSIS_COVERAGE_TARGETS`, etc.
    /// List values are comma-separated. Unparsable values are ignored.
    fn apply_env_overrides(config: &mut RegshiftConfig) {
        if let Ok(val) = std::env::var("REGSHIFT_INGEST_MAX_REJECTION_RATE") {
            if let Ok(v) = val.trim().parse::<f64>() {
                config.ingest.max_rejection_rate = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REGSHIFT_ANALYSIS_DETERMINISM_THRESHOLD") {
            if let Ok(v) = val.trim().parse::<f64>() {
                config.analysis.determinism_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REGSHIFT_ANALYSIS_COVERAGE_TARGETS") {
            if let Some(v) = parse_list::<u32>(&val) {
                config.analysis.coverage_targets = v;
            }
        }
        if let Ok(val) = std::env::var("REGSHIFT_ANALYSIS_RULE_MILESTONES") {
            if let Some(v) = parse_list::<usize>(&val) {
                config.analysis.rule_milestones = v;
            }
        }
        if let Ok(val) = std::env::var("REGSHIFT_ANALYSIS_GRANULARITIES") {
            if let Some(v) = parse_list::<String>(&val) {
                config.analysis.granularities = v;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RegshiftConfig, cli: &CliOverrides) {
        if let Some(v) = cli.max_rejection_rate {
            config.ingest.max_rejection_rate = Some(v);
        }
        if let Some(v) = cli.determinism_threshold {
            config.analysis.determinism_threshold = Some(v);
        }
        if let Some(ref v) = cli.coverage_targets {
            config.analysis.coverage_targets = v.clone();
        }
        if let Some(ref v) = cli.rule_milestones {
            config.analysis.rule_milestones = v.clone();
        }
        if let Some(ref v) = cli.granularities {
            config.analysis.granularities = v.clone();
        }
        if let Some(v) = cli.max_ranked_patterns {
            config.analysis.max_ranked_patterns = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Parse a comma-separated list; `None` if any element fails or the list is empty.
fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    let items: Vec<T> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().ok())
        .collect::<Option<Vec<T>>>()?;
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
