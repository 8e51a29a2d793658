//! End-to-end tests for the `bulkdl` binary: exit codes, input sources, and
//! report output.

#![allow(deprecated)]

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::MockServer;

use support::{mount_file, mount_status};

fn bulkdl() -> Command {
    let mut cmd = Command::cargo_bin("bulkdl").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_lists_core_flags() {
    bulkdl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--concurrency"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--input-file"));
}

#[test]
fn test_binary_rejects_zero_concurrency() {
    bulkdl()
        .args(["-c", "0", "https://example.com/a.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency"));
}

#[test]
fn test_binary_no_urls_in_input_is_success() {
    bulkdl()
        .write_stdin("# only a comment\n\n")
        .assert()
        .success();
}

#[tokio::test]
async fn test_binary_all_succeeded_exits_zero_with_summary() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/a.txt", b"aaaa").await;
    mount_file(&mock_server, "/b.txt", b"bbbbbb").await;
    let tempdir = TempDir::new().unwrap();

    bulkdl()
        .arg("--output-dir")
        .arg(tempdir.path())
        .arg("--no-progress")
        .arg(format!("{}/a.txt", mock_server.uri()))
        .arg(format!("{}/b.txt", mock_server.uri()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded a.txt"))
        .stdout(predicate::str::contains("Total: 10 bytes"));

    assert_eq!(std::fs::read(tempdir.path().join("a.txt")).unwrap(), b"aaaa");
}

#[tokio::test]
async fn test_binary_exit_code_partial_success_is_one() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/ok", b"PDF").await;
    mount_status(&mock_server, "/fail", 404).await;
    let tempdir = TempDir::new().unwrap();

    let assert = bulkdl()
        .arg("--output-dir")
        .arg(tempdir.path())
        .arg("-q")
        .arg(format!("{}/ok", mock_server.uri()))
        .arg(format!("{}/fail", mock_server.uri()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error downloading"));
    assert_eq!(
        assert.get_output().status.code(),
        Some(1),
        "partial success must yield exit code 1"
    );
}

#[tokio::test]
async fn test_binary_exit_code_all_failed_is_two() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/x", 500).await;
    mount_status(&mock_server, "/y", 404).await;
    let tempdir = TempDir::new().unwrap();

    let assert = bulkdl()
        .arg("-o")
        .arg(tempdir.path())
        .arg("-q")
        .arg(format!("{}/x", mock_server.uri()))
        .arg(format!("{}/y", mock_server.uri()))
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[tokio::test]
async fn test_binary_reads_input_file_and_prints_json() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/img/car.jpg", b"12345").await;
    let tempdir = TempDir::new().unwrap();
    let list = tempdir.path().join("urls.txt");
    std::fs::write(
        &list,
        format!("# cars\n{}/img/car.jpg\n", mock_server.uri()),
    )
    .unwrap();
    let out = tempdir.path().join("out");

    let assert = bulkdl()
        .arg("--input-file")
        .arg(&list)
        .arg("-o")
        .arg(&out)
        .arg("--json")
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["total_bytes"], 5);
    assert_eq!(report["successes"][0]["filename"], "car.jpg");
    assert!(out.join("car.jpg").exists());
}

#[tokio::test]
async fn test_binary_reads_piped_stdin() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/piped.bin", b"xy").await;
    let tempdir = TempDir::new().unwrap();

    bulkdl()
        .arg("-o")
        .arg(tempdir.path())
        .write_stdin(format!("{}/piped.bin\n", mock_server.uri()))
        .assert()
        .success();

    assert!(tempdir.path().join("piped.bin").exists());
}

#[test]
fn test_binary_output_dir_blocked_is_fatal() {
    let tempdir = TempDir::new().unwrap();
    let blocker = tempdir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();

    bulkdl()
        .arg("-o")
        .arg(blocker.join("sub"))
        .arg("https://example.invalid/a.bin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot download into"));
}
