use std::path::Path;

use anyhow::{Context, Result};

use crate::check::{compare, compare_parallel, Finding};
use crate::loader::{load_surface, LoadedSurface};
use crate::report::{Report, SurfaceInfo};

/// Convenience wrapper bundling the OLD and NEW snapshots of one comparison.
#[derive(Debug)]
pub struct ComparisonContext {
    pub old: LoadedSurface,
    pub new: LoadedSurface,
}

impl ComparisonContext {
    /// Load and validate both snapshots. Fails before any comparison if either
    /// one is unreadable or malformed.
    pub fn from_paths(old: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<Self> {
        let old_path = old.as_ref();
        let new_path = new.as_ref();
        let old = load_surface(old_path)
            .with_context(|| format!("Failed to load old surface from {}", old_path.display()))?;
        let new = load_surface(new_path)
            .with_context(|| format!("Failed to load new surface from {}", new_path.display()))?;
        Ok(Self { old, new })
    }

    pub fn findings(&self, parallel: bool) -> Vec<Finding> {
        if parallel {
            compare_parallel(&self.old.surface, &self.new.surface)
        } else {
            compare(&self.old.surface, &self.new.surface)
        }
    }

    pub fn report(&self, findings: Vec<Finding>) -> Report {
        let old = SurfaceInfo::from_loaded(&self.old);
        let new = SurfaceInfo::from_loaded(&self.new);
        Report::new(old, new, findings)
    }
}
