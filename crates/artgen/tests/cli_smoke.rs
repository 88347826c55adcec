use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn artgen() -> Command {
    let mut cmd = Command::cargo_bin("artgen").expect("binary exists");
    cmd.env_remove("ARTGEN_OUTPUT_FILE").env_remove("ARTGEN_OS");
    cmd
}

#[test]
fn help_displays_usage() {
    artgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn generate_writes_playbook() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let output = temp.path().join("servers.yml");

    artgen()
        .args(["--config"])
        .arg(&config)
        .args(["generate", "--os", "linux", "--hosts", "servers", "-t", "T1", "-t", "T2", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("---\nhosts: servers\ngather_facts: true\n"));
    assert!(written.contains("art_tids_linux:\n    - T1\n    - T2\n"));
}

#[test]
fn generate_reports_unwritable_path() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let output = temp.path().join("no/such/dir/out.yml");

    artgen()
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write playbook"));
}

#[test]
fn completions_are_printed() {
    artgen()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("artgen"));
}
