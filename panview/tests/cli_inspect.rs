use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_detect_identifies_panorama() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/panorama.xml"))
        .arg("--detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("type=panorama"))
        .stdout(predicate::str::contains("version=10.2.0"))
        .stdout(predicate::str::contains("version_source="));
}

#[test]
fn inspect_detect_identifies_firewall() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/firewall.xml"))
        .arg("--detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("type=firewall"))
        .stdout(predicate::str::contains("version=10.1.0"));
}

#[test]
fn inspect_lists_scopes_and_counts() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.env("NO_COLOR", "1")
        .arg("inspect")
        .arg(fixture("fixtures/panorama.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- branch"))
        .stdout(predicate::str::contains("- empty-dg"))
        .stdout(predicate::str::contains("- base-template"))
        .stdout(predicate::str::contains("- addresses: 6"))
        .stdout(predicate::str::contains("- security-rules: 5"));
}

#[test]
fn inspect_json_is_parseable() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    let output = cmd
        .arg("inspect")
        .arg(fixture("fixtures/firewall.xml"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["flavor"], "firewall");
    assert_eq!(value["vsys"], serde_json::json!(["vsys1", "vsys2"]));
}

#[test]
fn inspect_missing_file_fails() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/does-not-exist.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.xml"));
}
