//! The single-item transfer seam used by the engine.

use async_trait::async_trait;

use super::client::HttpClient;
use super::error::DownloadError;
use super::outcome::{DownloadRequest, TransferReceipt};

/// Moves one URL into one file.
///
/// Implementations must leave no file behind when they return an error.
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Performs the transfer described by `request`.
    async fn transfer(&self, request: &DownloadRequest) -> Result<TransferReceipt, DownloadError>;
}

#[async_trait]
impl Transfer for HttpClient {
    async fn transfer(&self, request: &DownloadRequest) -> Result<TransferReceipt, DownloadError> {
        self.download_to_file(request.url(), request.output_dir())
            .await
    }
}
