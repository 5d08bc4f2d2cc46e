//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use seed_qa_test_support::SeedImageBuilder;
use tempfile::TempDir;

/// A scratch directory holding one seed image, used as cwd and config home.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("seed.png"), SeedImageBuilder::png_bytes(32, 32)).unwrap();
    dir
}

fn seed_qa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("seed-qa").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir);
    cmd
}

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_path_shows_error() {
    let dir = workspace();
    seed_qa(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No paths specified"));
}

#[test]
fn test_nonexistent_path_is_empty_submission() {
    let dir = workspace();
    seed_qa(dir.path())
        .arg("missing.png")
        .arg("--no-report")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("No images selected"));
}

#[test]
fn test_empty_directory() {
    let dir = workspace();
    let empty = dir.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    seed_qa(dir.path())
        .arg(&empty)
        .arg("--no-report")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please upload at least one seed image"));
}

#[test]
fn test_non_image_file_rejected() {
    let dir = workspace();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    seed_qa(dir.path())
        .arg("notes.txt")
        .arg("seed.png")
        .arg("--no-report")
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("WARN: Invalid file type: notes.txt"));
}

#[test]
fn test_oversized_file_rejected() {
    let dir = workspace();
    std::fs::write(dir.path().join("big.png"), vec![0u8; 2 * 1024 * 1024]).unwrap();

    seed_qa(dir.path())
        .args(["--max-file-size-mb", "1", "--no-report", "big.png", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("File too large"));
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["--format", "xml", "seed.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

#[test]
fn test_valid_formats_accepted() {
    let dir = workspace();
    for format in ["json", "jsonl"] {
        seed_qa(dir.path())
            .args(["--format", format, "--no-report", "seed.png"])
            .assert()
            .code(predicate::in_iter([0, 1]));
    }
}

// === Numeric Option Validation ===

#[test]
fn test_zero_timeout_rejected() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["--timeout-ms", "0", "seed.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-ms"));
}

#[test]
fn test_zero_size_limit_rejected() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["--max-file-size-mb", "0", "seed.png"])
        .assert()
        .failure();
}

#[test]
fn test_non_numeric_seed_rejected() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["--seed", "abc", "seed.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// === Verbosity ===

#[test]
fn test_verbosity_v() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["-v", "--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("INFO"));
}

#[test]
fn test_verbosity_vv() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["-vv", "--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_quiet_suppresses_notifications() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["-q", "--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stderr(predicate::str::is_empty());
}

// === Paths ===

#[test]
fn test_multiple_paths() {
    let dir = workspace();
    std::fs::write(dir.path().join("second.jpg"), SeedImageBuilder::jpeg_bytes(32, 32)).unwrap();

    let output = seed_qa(dir.path())
        .args(["--no-report", "seed.png", "second.jpg"])
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 2);
}

#[test]
fn test_recursive_flag() {
    let dir = workspace();
    let nested = dir.path().join("lot").join("tray");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("deep.png"), SeedImageBuilder::png_bytes(16, 16)).unwrap();

    // Without -r the nested image is not found
    seed_qa(dir.path())
        .args(["--no-report", "lot"])
        .assert()
        .code(2);

    seed_qa(dir.path())
        .args(["-r", "--no-report", "lot"])
        .assert()
        .code(predicate::in_iter([0, 1]))
        .stdout(predicate::str::contains("deep.png"));
}

// === Help and Version ===

#[test]
fn test_help_flag() {
    let dir = workspace();
    seed_qa(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--report-dir"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_version_flag() {
    let dir = workspace();
    seed_qa(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed-qa"));
}

// === Subcommands ===

#[test]
fn test_analyze_subcommand() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["analyze", "--no-report", "seed.png"])
        .assert()
        .code(predicate::in_iter([0, 1]));
}

#[test]
fn test_grade_subcommand() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["grade", "85"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High quality, grade A"));

    seed_qa(dir.path())
        .args(["grade", "84", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""quality_tier":"Medium""#))
        .stdout(predicate::str::contains(r#""grade":"B""#));
}

#[test]
fn test_grade_rejects_out_of_range() {
    let dir = workspace();
    seed_qa(dir.path())
        .args(["grade", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("101"));
}
