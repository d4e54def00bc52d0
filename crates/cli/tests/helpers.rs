use std::path::Path;

use compare_surfaces::commands::load_config_or_default;
use compare_surfaces::infer_surface_label;
use surface_core::config::FailOn;

#[test]
fn infer_surface_label_uses_file_stem() {
    assert_eq!(infer_surface_label(Path::new("snapshots/api-29.json")), "api-29");
    assert_eq!(infer_surface_label(Path::new("/tmp/current.yaml")), "current");
}

#[test]
fn infer_surface_label_falls_back_when_missing() {
    assert_eq!(infer_surface_label(Path::new("/")), "unnamed-surface");
}

#[test]
fn missing_config_path_means_defaults() {
    let config = load_config_or_default(None).expect("defaults");
    assert_eq!(config.fail_on, FailOn::Breaking);
    assert!(config.suppress.is_empty());
}
