use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn show_prints_entry_xml() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.arg("show")
        .arg(fixture("fixtures/firewall.xml"))
        .arg("--xpath")
        .arg("/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys1']/service/entry[@name='ssh-alt']")
        .assert()
        .success()
        .stdout(predicate::str::contains("<port>2222</port>"))
        .stdout(predicate::str::contains("ssh-alt"));
}

#[test]
fn show_unknown_xpath_fails() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panview"));
    cmd.arg("show")
        .arg(fixture("fixtures/firewall.xml"))
        .arg("--xpath")
        .arg("/config/shared/address/entry[@name='missing']")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no element at xpath"));
}
