use std::path::Path;

use anyhow::{Context, Result};
use surface_core::config::{load_check_config, CheckConfig};
use surface_core::loader::{load_surface, LoadedSurface};
use surface_core::report::SurfaceInfo;

use crate::infer_surface_label;

/// Load the checker config if a path was given, otherwise use defaults.
pub fn load_config_or_default(path: Option<&str>) -> Result<CheckConfig> {
    match path {
        Some(path) => load_check_config(Path::new(path))
            .with_context(|| format!("Failed to load checker config from {path}")),
        None => Ok(CheckConfig::default()),
    }
}

/// Load and validate one snapshot (delegates to core loader).
pub fn load_snapshot(path: &str) -> Result<LoadedSurface> {
    load_surface(Path::new(path))
        .with_context(|| format!("Failed to load surface snapshot {path}"))
}

/// Fill in a label from the file name when the snapshot does not carry one.
pub fn label_or_file_stem(info: &mut SurfaceInfo, path: &str) {
    if info.label.is_none() && info.version.is_none() {
        info.label = Some(infer_surface_label(Path::new(path)));
    }
}

/// Print a rendered document, adding a trailing newline only when missing.
pub fn print_rendered(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}
