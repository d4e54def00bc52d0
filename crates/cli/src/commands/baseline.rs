use std::path::Path;

use anyhow::{Context, Result};
use surface_core::config::Baseline;
use surface_core::ComparisonContext;

use crate::commands::load_config_or_default;

/// Record the current warning/breaking findings as accepted.
pub fn baseline_command(old: &str, new: &str, output: &str, config: Option<&str>) -> Result<()> {
    let config = load_config_or_default(config)?;
    let ctx = ComparisonContext::from_paths(old, new)?;
    let findings = config.apply_suppressions(ctx.findings(config.parallel));

    let baseline = Baseline::from_findings(
        &findings,
        Some(ctx.old.digest.clone()),
        Some(ctx.new.digest.clone()),
    );
    baseline
        .save(Path::new(output))
        .with_context(|| format!("Failed to write baseline to {output}"))?;

    println!("Wrote baseline:");
    println!("  Accepted findings: {}", baseline.len());
    println!("  Path: {output}");

    Ok(())
}
