use anyhow::{Context, Result};
use serde::Serialize;

use crate::commands::load_snapshot;
use crate::infer_surface_label;

#[derive(Debug, Serialize)]
pub struct ValidationSummary {
    pub label: String,
    pub version: Option<u32>,
    pub digest: String,
    pub classes: usize,
    pub members: usize,
}

/// Load a snapshot and report its size, failing if it is malformed.
pub fn validate_command(surface: &str, json: bool) -> Result<()> {
    let summary = validation_summary(surface)?;

    if json {
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize validation summary to JSON")?;
        println!("{}", serialized);
    } else {
        println!("Surface OK: {}", summary.label);
        match summary.version {
            Some(version) => println!("  Version: {version}"),
            None => println!("  Version: -"),
        }
        println!("  Classes: {}", summary.classes);
        println!("  Members: {}", summary.members);
        println!("  Digest:  {}", summary.digest);
    }

    Ok(())
}

pub fn validation_summary(surface: &str) -> Result<ValidationSummary> {
    let loaded = load_snapshot(surface)?;
    let label = loaded
        .surface
        .label()
        .map(str::to_string)
        .unwrap_or_else(|| infer_surface_label(&loaded.path));
    Ok(ValidationSummary {
        label,
        version: loaded.surface.version(),
        digest: loaded.digest.clone(),
        classes: loaded.surface.len(),
        members: loaded.surface.member_count(),
    })
}
