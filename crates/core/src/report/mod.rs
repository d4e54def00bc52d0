//! Presentation of comparison results as text or JSON.
//!
//! Rendering is pure: a [`Report`] is built once from the findings and the two
//! surfaces' identities, and rendering it never touches the filesystem.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::{Finding, Severity};
use crate::loader::LoadedSurface;

/// Output encodings supported by [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown report format '{0}' (expected text or json)")]
pub struct UnknownReportFormat(pub String);

impl FromStr for ReportFormat {
    type Err = UnknownReportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(UnknownReportFormat(other.to_string())),
        }
    }
}

/// Identity of one compared surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceInfo {
    pub label: Option<String>,
    pub version: Option<u32>,
    pub digest: Option<String>,
    pub classes: usize,
}

impl SurfaceInfo {
    pub fn from_loaded(loaded: &LoadedSurface) -> Self {
        Self {
            label: loaded.surface.label().map(str::to_string),
            version: loaded.surface.version(),
            digest: Some(loaded.digest.clone()),
            classes: loaded.surface.len(),
        }
    }

    fn display_name(&self, fallback: &str) -> String {
        match (&self.label, self.version) {
            (Some(label), _) => label.clone(),
            (None, Some(version)) => format!("api-{version}"),
            (None, None) => fallback.to_string(),
        }
    }
}

/// Finding counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub breaking: usize,
    pub warning: usize,
    pub informational: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Summary { total: findings.len(), ..Summary::default() };
        for finding in findings {
            match finding.severity {
                Severity::Breaking => summary.breaking += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Informational => summary.informational += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub old: SurfaceInfo,
    pub new: SurfaceInfo,
    pub summary: Summary,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(old: SurfaceInfo, new: SurfaceInfo, findings: Vec<Finding>) -> Self {
        let summary = Summary::from_findings(&findings);
        Self { old, new, summary, findings }
    }
}

pub fn render(report: &Report, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparing {} -> {}",
        report.old.display_name("<old>"),
        report.new.display_name("<new>")
    );

    if report.findings.is_empty() {
        out.push_str("No differences found.\n");
    } else {
        for finding in &report.findings {
            let _ = writeln!(
                out,
                "[{}] {:<7} {}: {}",
                severity_tag(finding.severity),
                finding.kind.as_str(),
                finding.symbol_path,
                finding.detail
            );
        }
    }

    let summary = &report.summary;
    let _ = writeln!(
        out,
        "Summary: {} breaking, {} warning(s), {} informational ({} total)",
        summary.breaking, summary.warning, summary.informational, summary.total
    );
    out
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Breaking => "BREAKING",
        Severity::Warning => "WARNING",
        Severity::Informational => "INFO",
    }
}
