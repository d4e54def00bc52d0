use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::check::{Finding, Severity};

/// A finding that has been reviewed and accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub symbol_path: String,
    pub detail: String,
}

/// Recorded set of accepted warning/breaking findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub created_at: String,
    pub tool_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_digest: Option<String>,
    #[serde(default)]
    pub entries: BTreeSet<BaselineEntry>,
}

impl Baseline {
    /// Capture every non-informational finding.
    pub fn from_findings(
        findings: &[Finding],
        old_digest: Option<String>,
        new_digest: Option<String>,
    ) -> Self {
        let entries = findings
            .iter()
            .filter(|f| f.severity > Severity::Informational)
            .map(|f| BaselineEntry { symbol_path: f.symbol_path.clone(), detail: f.detail.clone() })
            .collect();
        Self {
            created_at: Utc::now().to_rfc3339(),
            tool_version: crate::version().to_string(),
            old_digest,
            new_digest,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, finding: &Finding) -> bool {
        self.entries.contains(&BaselineEntry {
            symbol_path: finding.symbol_path.clone(),
            detail: finding.detail.clone(),
        })
    }

    /// Drop findings the baseline already accepts.
    pub fn filter(&self, findings: Vec<Finding>) -> Vec<Finding> {
        findings.into_iter().filter(|f| !self.contains(f)).collect()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&body)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        fs::write(path, json).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }
}
