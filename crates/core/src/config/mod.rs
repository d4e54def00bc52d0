//! Checker configuration and baselines.
//!
//! A `CheckConfig` is an optional JSON/YAML file controlling the failure
//! threshold, default output format, and suppressed symbols. Baselines
//! record findings that were accepted at some point so later comparisons can
//! ignore them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::{Finding, Severity};
use crate::report::ReportFormat;

mod baseline;

pub use baseline::{Baseline, BaselineEntry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unknown fail-on level '{0}' (expected breaking, warning, or never)")]
    UnknownFailOn(String),
}

/// Which findings make a comparison fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailOn {
    #[default]
    Breaking,
    Warning,
    Never,
}

impl FailOn {
    /// Whether any finding reaches this threshold.
    pub fn trips(self, findings: &[Finding]) -> bool {
        let threshold = match self {
            FailOn::Breaking => Severity::Breaking,
            FailOn::Warning => Severity::Warning,
            FailOn::Never => return false,
        };
        findings.iter().any(|finding| finding.severity >= threshold)
    }
}

impl FromStr for FailOn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breaking" => Ok(FailOn::Breaking),
            "warning" => Ok(FailOn::Warning),
            "never" => Ok(FailOn::Never),
            other => Err(ConfigError::UnknownFailOn(other.to_string())),
        }
    }
}

/// Serializable settings for a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub fail_on: FailOn,
    #[serde(default)]
    pub format: ReportFormat,
    /// Use the parallel checker.
    #[serde(default)]
    pub parallel: bool,
    /// Symbol paths whose findings are dropped. A trailing `*` matches any
    /// path with that prefix, e.g. `android.test.*`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub suppress: BTreeSet<String>,
}

impl CheckConfig {
    pub fn is_suppressed(&self, symbol_path: &str) -> bool {
        self.suppress.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => symbol_path.starts_with(prefix),
            None => symbol_path == pattern,
        })
    }

    pub fn apply_suppressions(&self, findings: Vec<Finding>) -> Vec<Finding> {
        if self.suppress.is_empty() {
            return findings;
        }
        findings.into_iter().filter(|f| !self.is_suppressed(&f.symbol_path)).collect()
    }
}

/// Load a config file, picking JSON or YAML by extension (JSON otherwise).
pub fn load_check_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let body = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&body)
            .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })
    } else {
        serde_json::from_str(&body)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }
}
