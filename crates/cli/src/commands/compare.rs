use std::path::Path;

use anyhow::{Context, Result};
use surface_core::config::{Baseline, FailOn};
use surface_core::report::{render, Report, ReportFormat};
use surface_core::ComparisonContext;
use tracing::info;

use crate::commands::{label_or_file_stem, load_config_or_default, print_rendered};

/// Inputs of a `compare` run. Unset options fall back to the config file,
/// then to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    pub old: String,
    pub new: String,
    pub fail_on: Option<FailOn>,
    pub format: Option<ReportFormat>,
    pub config: Option<String>,
    pub baseline: Option<String>,
    pub parallel: bool,
}

#[derive(Debug)]
pub struct CompareOutcome {
    pub report: Report,
    pub rendered: String,
    /// Whether any reported finding reaches the fail-on threshold.
    pub tripped: bool,
}

/// Load both snapshots, compare them, and render the report without printing.
///
/// Any load failure returns before a single finding is produced.
pub fn run_compare(options: &CompareOptions) -> Result<CompareOutcome> {
    let config = load_config_or_default(options.config.as_deref())?;
    let ctx = ComparisonContext::from_paths(&options.old, &options.new)?;
    let baseline = match &options.baseline {
        Some(path) => Some(
            Baseline::load(Path::new(path))
                .with_context(|| format!("Failed to load baseline from {path}"))?,
        ),
        None => None,
    };

    let mut findings = ctx.findings(options.parallel || config.parallel);
    findings = config.apply_suppressions(findings);
    if let Some(baseline) = &baseline {
        findings = baseline.filter(findings);
    }

    let fail_on = options.fail_on.unwrap_or(config.fail_on);
    let tripped = fail_on.trips(&findings);

    let mut report = ctx.report(findings);
    label_or_file_stem(&mut report.old, &options.old);
    label_or_file_stem(&mut report.new, &options.new);
    info!(
        breaking = report.summary.breaking,
        total = report.summary.total,
        tripped,
        "comparison finished"
    );

    let format = options.format.unwrap_or(config.format);
    let rendered = render(&report, format).context("Failed to render report")?;
    Ok(CompareOutcome { report, rendered, tripped })
}

/// Compare two snapshots and print the report. Returns whether the run
/// tripped the fail-on threshold.
pub fn compare_command(options: &CompareOptions) -> Result<bool> {
    let outcome = run_compare(options)?;
    print_rendered(&outcome.rendered);
    Ok(outcome.tripped)
}
