mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

use common::{path_str, write, MALFORMED_SURFACE, NEW_SURFACE, OLD_SURFACE};

/// A breaking change exits 1 and the text report names it.
#[test]
fn compare_reports_breaking_change_with_exit_code_one() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "api-28.json", OLD_SURFACE);
    let new = write(dir.path(), "api-29.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .arg("compare")
        .arg("--old")
        .arg(&old)
        .arg("--new")
        .arg(&new)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Comparing api-28 -> api-29"))
        .stdout(predicate::str::contains(
            "[BREAKING] changed android.content.ClipData#getItemAt(int): added final modifier",
        ))
        .stdout(predicate::str::contains("1 breaking, 1 warning(s), 1 informational"));
}

/// Without a subcommand the CLI behaves like `compare`.
#[test]
fn bare_invocation_compares() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "old.json", OLD_SURFACE);
    let new = write(dir.path(), "new.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .arg("--old")
        .arg(&old)
        .arg("--new")
        .arg(&new)
        .arg("--fail-on")
        .arg("never")
        .assert()
        .success()
        .stdout(predicate::str::contains("android.content.ClipDescription"));
}

#[test]
fn identical_snapshots_exit_zero() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "a.json", OLD_SURFACE);
    let new = write(dir.path(), "b.json", OLD_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .arg("compare")
        .arg("--old")
        .arg(&old)
        .arg("--new")
        .arg(&new)
        .assert()
        .success()
        .stdout(predicate::str::contains("No differences found."));
}

/// Malformed input exits 2 and prints no findings.
#[test]
fn malformed_snapshot_exits_two_without_findings() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "bad.json", MALFORMED_SURFACE);
    let new = write(dir.path(), "new.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .arg("compare")
        .arg("--old")
        .arg(&old)
        .arg("--new")
        .arg(&new)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("a.Foo#m(int)"))
        .stderr(predicate::str::contains("duplicate method signature"));
}

#[test]
fn missing_snapshot_exits_two() {
    let dir = tempdir().expect("tempdir");
    let new = write(dir.path(), "new.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .arg("compare")
        .arg("--old")
        .arg(dir.path().join("absent.json"))
        .arg("--new")
        .arg(&new)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load old surface"));
}

#[test]
fn fail_on_warning_and_never_change_exit_status() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "old.json", OLD_SURFACE);
    let new = write(dir.path(), "new.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .args(["compare", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
        .args(["--fail-on", "never"])
        .assert()
        .success();

    cargo_bin_cmd!("compare-surfaces")
        .args(["compare", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
        .args(["--fail-on", "bogus"])
        .assert()
        .failure();
}

#[test]
fn json_report_is_machine_readable_and_deterministic() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "old.json", OLD_SURFACE);
    let new = write(dir.path(), "new.json", NEW_SURFACE);

    let run = || {
        cargo_bin_cmd!("compare-surfaces")
            .args(["compare", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
            .args(["--format", "json", "--fail-on", "never"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let first = run();
    assert_eq!(first, run(), "reports should be byte-identical");

    let body: serde_json::Value = serde_json::from_slice(&first).expect("report json");
    assert_eq!(body["summary"]["total"], 3);
    assert_eq!(body["old"]["label"], "api-28");
    let paths: Vec<&str> = body["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["symbol_path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec![
            "android.content.ClipData#getItemAt(int)",
            "android.content.ClipDescription",
            "android.content.ClipboardManager#hasText()",
        ]
    );
    assert_eq!(body["findings"][2]["severity"], "warning");
}

#[test]
fn baseline_then_compare_accepts_recorded_findings() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "old.json", OLD_SURFACE);
    let new = write(dir.path(), "new.yaml", &yaml_from_json(NEW_SURFACE));
    let baseline = dir.path().join("baseline.json");

    cargo_bin_cmd!("compare-surfaces")
        .args(["baseline", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
        .args(["--output", path_str(&baseline).as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted findings: 2"));
    assert!(baseline.is_file());

    cargo_bin_cmd!("compare-surfaces")
        .args(["compare", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
        .args(["--baseline", path_str(&baseline).as_str(), "--fail-on", "warning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 breaking, 0 warning(s), 1 informational"));
}

#[test]
fn validate_reports_counts_and_rejects_malformed() {
    let dir = tempdir().expect("tempdir");
    let good = write(dir.path(), "api-28.json", OLD_SURFACE);
    let bad = write(dir.path(), "bad.json", MALFORMED_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .args(["validate", "--surface", path_str(&good).as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Surface OK: api-28"))
        .stdout(predicate::str::contains("Classes: 3"))
        .stdout(predicate::str::contains("Members: 3"));

    cargo_bin_cmd!("compare-surfaces")
        .args(["validate", "--surface", path_str(&bad).as_str()])
        .assert()
        .code(2);
}

#[test]
fn inspect_shows_unresolved_supertype() {
    let dir = tempdir().expect("tempdir");
    let surface = write(dir.path(), "api-28.json", OLD_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .args(["inspect", "--surface", path_str(&surface).as_str(), "--class", "android.content.ClipData"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public class android.content.ClipData"))
        .stdout(predicate::str::contains("Unresolved: java.lang.Object"))
        .stdout(predicate::str::contains("Interfaces: android.os.Parcelable"));

    cargo_bin_cmd!("compare-surfaces")
        .args(["inspect", "--surface", path_str(&surface).as_str(), "--class", "android.Missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Class not found in surface: android.Missing"));
}

/// `-v` is global, so it may precede the subcommand.
#[test]
fn verbose_flag_is_accepted_before_subcommands() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "api-28.json", OLD_SURFACE);
    let new = write(dir.path(), "api-29.json", NEW_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .args(["-v", "compare", "--old", path_str(&old).as_str(), "--new", path_str(&new).as_str()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("added final modifier"));

    cargo_bin_cmd!("compare-surfaces")
        .args(["-vv", "validate", "--surface", path_str(&old).as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Surface OK: api-28"));
}

#[test]
fn comparison_options_before_a_subcommand_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let old = write(dir.path(), "api-28.json", OLD_SURFACE);

    cargo_bin_cmd!("compare-surfaces")
        .args(["--old", path_str(&old).as_str(), "validate", "--surface", path_str(&old).as_str()])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("must follow the subcommand"));
}

#[test]
fn validate_rejects_snapshot_that_is_not_utf8() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("latin1.json");
    std::fs::write(&path, b"{\"classes\":[{\"name\":\"a.F\xffoo\"}]}").expect("write");

    cargo_bin_cmd!("compare-surfaces")
        .args(["validate", "--surface", path_str(&path).as_str()])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not valid UTF-8"));
}

fn yaml_from_json(body: &str) -> String {
    let value: serde_yaml::Value = serde_json::from_str(body).expect("fixture json");
    serde_yaml::to_string(&value).expect("fixture yaml")
}
