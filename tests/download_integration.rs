//! Integration tests for the single-file transfer.
//!
//! These tests verify the full download flow with mock HTTP servers.

mod support;

use std::time::Duration;

use bulkdl_core::download::{DownloadError, FailureKind, HttpClient};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{file_count, mount_file, mount_status, serve_truncated_body};

#[tokio::test]
async fn test_download_full_flow_preserves_content() {
    let content = b"This is the complete file content for testing.\nLine 2.\nLine 3.";
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/document.pdf", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let client = HttpClient::new();
    let url = format!("{}/document.pdf", mock_server.uri());
    let receipt = client
        .download_to_file(&url, temp_dir.path())
        .await
        .expect("download should succeed");

    assert_eq!(receipt.path, temp_dir.path().join("document.pdf"));
    assert_eq!(receipt.bytes, content.len() as u64);
    assert_eq!(std::fs::read(&receipt.path).unwrap(), content);
}

#[tokio::test]
async fn test_download_filename_ignores_query_string() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/img/mustang-2.jpg", b"jpeg").await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/img/mustang-2.jpg?size=large&v=3", mock_server.uri());
    let receipt = HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap();

    assert_eq!(receipt.filename(), "mustang-2.jpg");
}

#[tokio::test]
async fn test_download_empty_body_creates_empty_file() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/empty.txt", b"").await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/empty.txt", mock_server.uri());
    let receipt = HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap();

    assert_eq!(receipt.bytes, 0);
    assert!(receipt.path.exists());
    assert_eq!(std::fs::metadata(&receipt.path).unwrap().len(), 0);
}

#[tokio::test]
async fn test_download_overwrites_existing_file() {
    let mock_server = MockServer::start().await;
    mount_file(&mock_server, "/report.csv", b"new").await;
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("report.csv"), b"old contents that are longer").unwrap();

    let url = format!("{}/report.csv", mock_server.uri());
    HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap();

    assert_eq!(
        std::fs::read(temp_dir.path().join("report.csv")).unwrap(),
        b"new"
    );
}

#[tokio::test]
async fn test_download_404_returns_http_status_and_leaves_no_file() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/missing.pdf", 404).await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/missing.pdf", mock_server.uri());
    let err = HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::HttpStatus { status: 404, .. }));
    assert_eq!(err.kind(), FailureKind::HttpStatus);
    assert!(!temp_dir.path().join("missing.pdf").exists());
    assert_eq!(file_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_download_500_returns_http_status() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/broken", 500).await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/broken", mock_server.uri());
    let err = HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(file_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_download_unwritable_destination_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".to_vec()))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let missing_dir = temp_dir.path().join("does-not-exist");

    let url = format!("{}/file.bin", mock_server.uri());
    let err = HttpClient::new()
        .download_to_file(&url, &missing_dir)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Io { .. }));
    assert_eq!(err.kind(), FailureKind::Io);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_download_timeout_classified_as_network_and_cleaned_up() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.bin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let client = HttpClient::new_with_timeouts(5, 1);
    let url = format!("{}/slow.bin", mock_server.uri());
    let err = client
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Timeout { .. }), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Network);
    assert!(!temp_dir.path().join("slow.bin").exists());
}

#[tokio::test]
async fn test_download_non_http_scheme_is_invalid_url() {
    let temp_dir = TempDir::new().unwrap();

    let err = HttpClient::new()
        .download_to_file("ftp://example.com/file.bin", temp_dir.path())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::InvalidUrl);
    assert_eq!(file_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_download_truncated_body_is_network_error_and_removes_file() {
    let base = serve_truncated_body(1000, b"0123456789").await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{base}/cut-short.bin");
    let err = HttpClient::new()
        .download_to_file(&url, temp_dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Network);
    assert!(!temp_dir.path().join("cut-short.bin").exists());
    assert_eq!(file_count(temp_dir.path()), 0);
}
