//! Integration tests for summa-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use summa_core::test_utils::ZipTestBuilder;
use summa_core::test_utils::write_archive;
use tempfile::TempDir;

/// Nothing listens on the discard port; a fetch attempt fails fast.
const UNREACHABLE_URL: &str = "http://127.0.0.1:9/data.zip";

fn summa_cmd() -> Command {
    cargo_bin_cmd!("summa")
}

fn dataset_zip(dir: &Path) -> PathBuf {
    let data = ZipTestBuilder::new()
        .add_directory("data/")
        .add_file("data/train.csv", b"a,b,c\n1,2,3")
        .add_file("data:info?.txt", b"meta")
        .build();
    write_archive(dir, "data.zip", &data)
}

fn write_config(dir: &Path, archive: &Path, unzip_dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!(
            "[data_ingestion]\nsource_URL = \"{UNREACHABLE_URL}\"\nlocal_data_file = '{}'\nunzip_dir = '{}'\n",
            archive.display(),
            unzip_dir.display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_version_flag() {
    summa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("summa"));
}

#[test]
fn test_help_lists_subcommands() {
    summa_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("train"));
}

#[test]
fn test_extract_sanitizes_names() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = dataset_zip(temp.path());
    let out = temp.path().join("out");

    summa_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert!(out.join("data").is_dir());
    assert_eq!(fs::read(out.join("data/train.csv")).unwrap(), b"a,b,c\n1,2,3");
    assert_eq!(fs::read(out.join("data_info_.txt")).unwrap(), b"meta");
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = dataset_zip(temp.path());

    let output = summa_cmd()
        .arg("--json")
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "extract");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["files_extracted"], 2);
    assert_eq!(value["data"]["directories_created"], 1);
    assert_eq!(value["data"]["names_sanitized"], 1);
}

#[test]
fn test_extract_reject_collision_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let data = ZipTestBuilder::new()
        .add_file("a:b.txt", b"first")
        .add_file("a?b.txt", b"second")
        .build();
    let archive = write_archive(temp.path(), "collide.zip", &data);

    summa_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .arg("--on-collision")
        .arg("reject")
        .assert()
        .failure()
        .stderr(predicate::str::contains("a_b.txt"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_extract_unsupported_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(temp.path(), "data.rar", b"Rar!");

    summa_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_extract_missing_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    summa_cmd()
        .arg("extract")
        .arg(temp.path().join("missing.zip"))
        .arg(temp.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn test_ingest_with_existing_archive_skips_download() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = dataset_zip(temp.path());
    let out = temp.path().join("artifacts");
    let config = write_config(temp.path(), &archive, &out);

    let output = summa_cmd()
        .arg("--json")
        .arg("ingest")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "ingest");
    assert_eq!(value["data"]["fetch"]["downloaded"], false);
    assert_eq!(value["data"]["unpack"]["files_extracted"], 2);
    assert_eq!(fs::read(out.join("data_info_.txt")).unwrap(), b"meta");
}

#[test]
fn test_ingest_flags_without_config_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = dataset_zip(temp.path());

    summa_cmd()
        .current_dir(temp.path())
        .arg("ingest")
        .arg("--source-url")
        .arg(UNREACHABLE_URL)
        .arg("--archive")
        .arg(&archive)
        .arg("--unzip-dir")
        .arg("unpacked")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingestion complete"));

    assert!(temp.path().join("unpacked/data/train.csv").is_file());
}

#[test]
fn test_ingest_missing_config_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    summa_cmd()
        .arg("ingest")
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_ingest_download_failure_reports_hint() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let config = write_config(
        temp.path(),
        &temp.path().join("never.zip"),
        &temp.path().join("out"),
    );

    summa_cmd()
        .arg("ingest")
        .arg("--config")
        .arg(&config)
        .arg("--timeout")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_fetch_existing_archive_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = dataset_zip(temp.path());
    let config = write_config(temp.path(), &archive, &temp.path().join("out"));

    let output = summa_cmd()
        .arg("--json")
        .arg("fetch")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "fetch");
    assert_eq!(value["data"]["downloaded"], false);
    assert!(!temp.path().join("out").exists());
}

#[cfg(unix)]
#[test]
fn test_train_success() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        "[training]\nprogram = \"sh\"\nargs = [\"-c\", \"echo trained\"]\n",
    )
    .unwrap();

    summa_cmd()
        .arg("--verbose")
        .arg("train")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Training complete"))
        .stdout(predicate::str::contains("trained"));
}

#[cfg(unix)]
#[test]
fn test_train_failure_exit_code() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        "[training]\nprogram = \"sh\"\nargs = [\"-c\", \"echo broken >&2; exit 3\"]\n",
    )
    .unwrap();

    summa_cmd()
        .arg("train")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn test_completion_bash() {
    summa_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("summa"));
}
