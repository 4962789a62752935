//! Integration tests for the fsaudit CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use tempfile::TempDir;

fn fsaudit() -> Command {
    let mut cmd = Command::cargo_bin("fsaudit").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn sample_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("notes.txt"), "x".repeat(27)).unwrap();
    File::create(root.join("nested/photo.png"))
        .unwrap()
        .set_len(2048)
        .unwrap();
    fs::write(root.join("nested/blob.xyz"), "abc").unwrap();
    temp_dir
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    fsaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("interactive"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    fsaudit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsaudit"));
}

#[test]
fn test_invalid_subcommand() {
    fsaudit()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_scan_text_report() {
    let temp_dir = sample_tree();

    fsaudit()
        .arg("scan")
        .arg(temp_dir.path())
        .args(["--threshold", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File Type Categorization"))
        .stdout(predicate::str::contains("Text (1 files): 27 bytes"))
        .stdout(predicate::str::contains("Image (1 files): 2048 bytes"))
        .stdout(predicate::str::contains("Other (1 files): 3 bytes"))
        .stdout(predicate::str::contains("photo.png (2048 bytes)"))
        .stdout(predicate::str::contains("blob.xyz (3 bytes)"));
}

#[test]
fn test_scan_json_report() {
    let temp_dir = sample_tree();

    let assert = fsaudit()
        .arg("scan")
        .arg(temp_dir.path())
        .args(["--format", "json", "--workers", "3"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["buckets"]["text"]["file_count"], 1);
    assert_eq!(value["threshold_bytes"], 104_857_600);
    assert_eq!(value["stats"]["workers"], 3);
    assert!(value["large_files"].as_array().unwrap().is_empty());
}

#[test]
fn test_scan_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    fsaudit()
        .arg("scan")
        .arg(temp_dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid root"));
}

#[test]
fn test_scan_rejects_non_positive_threshold() {
    let temp_dir = sample_tree();

    fsaudit()
        .arg("scan")
        .arg(temp_dir.path())
        .args(["--threshold", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid size threshold -5"));
}

#[test]
fn test_config_file_sets_default_threshold() {
    let temp_dir = sample_tree();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("fsaudit.toml");
    fs::write(&config_path, "[scan]\ndefault_threshold_bytes = 20\n").unwrap();

    fsaudit()
        .arg("--config")
        .arg(&config_path)
        .arg("scan")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt (27 bytes)"))
        .stdout(predicate::str::contains("photo.png (2048 bytes)"));
}

#[test]
fn test_log_file_is_written() {
    let temp_dir = sample_tree();
    let log_dir = TempDir::new().unwrap();
    let log_path = log_dir.path().join("fsaudit.log");

    fsaudit()
        .arg("-v")
        .arg("--log-file")
        .arg(&log_path)
        .arg("scan")
        .arg(temp_dir.path())
        .assert()
        .success();

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("analysis complete"));
}

#[test]
fn test_interactive_session_via_stdin() {
    let temp_dir = sample_tree();
    let input = format!("{}\n\n1\n", temp_dir.path().display());

    fsaudit()
        .arg("interactive")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the directory to analyze: "))
        .stdout(predicate::str::contains("Text (1 files): 27 bytes"));
}

#[test]
fn test_no_subcommand_starts_interactive() {
    fsaudit()
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("If you want to exit press '1'"));
}
