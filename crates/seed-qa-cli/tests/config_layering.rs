//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use seed_qa_test_support::SeedImageBuilder;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("seed.png"), SeedImageBuilder::png_bytes(32, 32)).unwrap();
    dir
}

fn seed_qa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("seed-qa").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir);
    cmd
}

fn write_project_config(dir: &Path, toml: &str) {
    fs::write(dir.join(".seed-qa.toml"), toml).unwrap();
}

fn write_xdg_config(dir: &Path, toml: &str) {
    let xdg = dir.join("xdg").join("seed-qa");
    fs::create_dir_all(&xdg).unwrap();
    fs::write(xdg.join("config.toml"), toml).unwrap();
}

fn pdf_count(dir: &Path) -> usize {
    fs::read_dir(dir).map_or(0, |entries| {
        entries
            .flatten()
            .filter(|e| e.path().extension().is_some_and(|x| x == "pdf"))
            .count()
    })
}

#[test]
fn test_project_config_applies_format() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[output]
format = 'json'

[report]
enabled = false
",
    );

    seed_qa(dir.path())
        .arg("seed.png")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_overrides_project_config() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[output]
format = 'json'
",
    );

    seed_qa(dir.path())
        .args(["--format", "jsonl", "--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_project_config_overrides_xdg() {
    let dir = workspace();
    write_xdg_config(
        dir.path(),
        r"
[output]
format = 'json'

[report]
enabled = false
",
    );
    write_project_config(
        dir.path(),
        r"
[output]
format = 'jsonl'
",
    );

    seed_qa(dir.path())
        .arg("seed.png")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stdout(predicate::str::starts_with("{"));

    // report.enabled from XDG survives the merge
    assert_eq!(pdf_count(dir.path()), 0);
}

#[test]
fn test_config_report_dir() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[report]
dir = 'reports'
",
    );

    seed_qa(dir.path())
        .arg("seed.png")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("Report written to"));

    assert_eq!(pdf_count(&dir.path().join("reports")), 1);
}

#[test]
fn test_cli_no_report_beats_config() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[report]
enabled = true
",
    );

    seed_qa(dir.path())
        .args(["--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]));

    assert_eq!(pdf_count(dir.path()), 0);
}

#[test]
fn test_config_seed_is_reproducible() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[analysis]
seed = 1234

[report]
enabled = false
",
    );

    let first = seed_qa(dir.path()).arg("seed.png").output().unwrap();
    let second = seed_qa(dir.path()).arg("seed.png").output().unwrap();

    let score = |out: &[u8]| -> serde_json::Value {
        let line = String::from_utf8_lossy(out).lines().next().unwrap().to_string();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        v["score"].clone()
    };
    assert_eq!(score(&first.stdout), score(&second.stdout));
}

#[test]
fn test_config_size_limit() {
    let dir = workspace();
    fs::write(dir.path().join("big.png"), vec![0u8; 2 * 1024 * 1024]).unwrap();
    write_project_config(
        dir.path(),
        r"
[upload]
max_file_size_mb = 1

[report]
enabled = false
",
    );

    seed_qa(dir.path())
        .args(["big.png", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("File too large"));
}

#[test]
fn test_invalid_config_warns() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[output]
format = 'xml'

[report]
enabled = false
",
    );

    seed_qa(dir.path())
        .arg("seed.png")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("output.format"));
}

#[test]
fn test_zero_size_limit_in_config_falls_back_to_default() {
    let dir = workspace();
    write_project_config(
        dir.path(),
        r"
[upload]
max_file_size_mb = 0

[report]
enabled = false
",
    );

    seed_qa(dir.path())
        .arg("seed.png")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stdout(predicate::str::contains("seed.png"))
        .stderr(predicate::str::contains("upload.max_file_size_mb"))
        .stderr(predicate::str::contains("File too large").not());
}

#[test]
fn test_unparsable_config_is_skipped() {
    let dir = workspace();
    write_project_config(dir.path(), "[output\nformat = 'json'");

    seed_qa(dir.path())
        .args(["--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("Failed to parse config file"));
}
