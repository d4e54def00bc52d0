mod common;

use compare_surfaces::commands::{
    baseline_command, inspect_command, run_compare, validate_command, validation_summary,
    CompareOptions,
};
use surface_core::config::{Baseline, FailOn};
use surface_core::report::ReportFormat;
use surface_core::Severity;
use tempfile::tempdir;

use common::{path_str, write, MALFORMED_SURFACE, NEW_SURFACE, OLD_SURFACE};

fn options(old: &str, new: &str) -> CompareOptions {
    CompareOptions { old: old.to_string(), new: new.to_string(), ..CompareOptions::default() }
}

#[test]
fn run_compare_trips_on_breaking_by_default() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", OLD_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));

    let outcome = run_compare(&options(&old, &new)).expect("compare");
    assert!(outcome.tripped);
    assert_eq!(outcome.report.summary.breaking, 1);
    assert_eq!(outcome.report.summary.warning, 1);
    assert!(outcome.rendered.starts_with("Comparing api-28 -> api-29"));
}

#[test]
fn parallel_and_sequential_runs_render_identically() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", OLD_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));

    let sequential = run_compare(&options(&old, &new)).unwrap();
    let parallel =
        run_compare(&CompareOptions { parallel: true, ..options(&old, &new) }).unwrap();
    assert_eq!(sequential.rendered, parallel.rendered);
}

#[test]
fn config_file_supplies_defaults_and_suppressions() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", OLD_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));
    let config = path_str(&write(
        dir.path(),
        "check.yaml",
        "format: json\nfail_on: warning\nsuppress:\n  - android.content.ClipData#*\n",
    ));

    let outcome =
        run_compare(&CompareOptions { config: Some(config), ..options(&old, &new) }).unwrap();
    assert!(outcome.tripped, "the deprecated removal still trips fail_on=warning");
    assert!(outcome.report.findings.iter().all(|f| f.severity != Severity::Breaking));
    let value: serde_json::Value = serde_json::from_str(&outcome.rendered).expect("json output");
    assert_eq!(value["summary"]["total"], 2);
}

#[test]
fn explicit_options_override_config() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", OLD_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));
    let config = path_str(&write(dir.path(), "check.json", r#"{ "format": "json" }"#));

    let outcome = run_compare(&CompareOptions {
        config: Some(config),
        format: Some(ReportFormat::Text),
        fail_on: Some(FailOn::Never),
        ..options(&old, &new)
    })
    .unwrap();
    assert!(!outcome.tripped);
    assert!(outcome.rendered.starts_with("Comparing"));
}

#[test]
fn unlabelled_snapshots_are_named_after_their_files() {
    let dir = tempdir().unwrap();
    let body = r#"{ "classes": [ { "name": "a.Foo" } ] }"#;
    let old = path_str(&write(dir.path(), "before.json", body));
    let new = path_str(&write(dir.path(), "after.json", body));

    let outcome = run_compare(&options(&old, &new)).unwrap();
    assert_eq!(outcome.report.old.label.as_deref(), Some("before"));
    assert!(outcome.rendered.starts_with("Comparing before -> after"));
}

#[test]
fn malformed_input_produces_no_outcome() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", MALFORMED_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));

    let err = run_compare(&options(&old, &new)).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate method signature"), "unexpected: {err:#}");
}

#[test]
fn baseline_command_writes_digests() {
    let dir = tempdir().unwrap();
    let old = path_str(&write(dir.path(), "old.json", OLD_SURFACE));
    let new = path_str(&write(dir.path(), "new.json", NEW_SURFACE));
    let output = dir.path().join("baseline.json");

    baseline_command(&old, &new, &path_str(&output), None).unwrap();
    let baseline = Baseline::load(&output).unwrap();
    assert_eq!(baseline.len(), 2);
    assert_eq!(baseline.old_digest.as_deref().map(str::len), Some(64));

    let outcome = run_compare(&CompareOptions {
        baseline: Some(path_str(&output)),
        ..options(&old, &new)
    })
    .unwrap();
    assert!(!outcome.tripped);
}

#[test]
fn validate_and_inspect_succeed_on_valid_snapshot() {
    let dir = tempdir().unwrap();
    let surface = path_str(&write(dir.path(), "api-28.json", OLD_SURFACE));

    validate_command(&surface, false).unwrap();
    validate_command(&surface, true).unwrap();
    let summary = validation_summary(&surface).unwrap();
    assert_eq!(summary.label, "api-28");
    assert_eq!(summary.version, Some(28));

    inspect_command(&surface, "android.content.ClipData", false).unwrap();
    inspect_command(&surface, "android.content.ClipData", true).unwrap();
    let err = inspect_command(&surface, "android.Nope", false).unwrap_err();
    assert!(format!("{err:#}").contains("Class not found"));
}
