//! Bounded-concurrency HTTP download engine.
//!
//! This module downloads batches of URLs to a local directory, streaming
//! each response body to disk while capping how many transfers run at once.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Deterministic filenames from the URL's last path segment
//! - Configurable timeouts (30s connect, 5min read by default)
//! - No partial files left behind on any failure path
//! - One outcome per URL, folded into a single [`AggregateReport`]
//!
//! # Example
//!
//! ```no_run
//! use bulkdl_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let receipt = client
//!     .download_to_file("https://example.com/paper.pdf", Path::new("./downloads"))
//!     .await?;
//! println!("Downloaded: {}", receipt.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;
mod filename;
mod limiter;
mod outcome;
mod transfer;

pub use client::HttpClient;
pub use constants::DEFAULT_CONCURRENCY;
pub use engine::{DownloadEngine, EngineError};
pub use error::{DownloadError, FailureKind};
pub use filename::{destination_path, filename_from_url};
pub use limiter::{AdmissionLimiter, AdmissionPermit};
pub use outcome::{
    AggregateReport, BatchError, CompletedDownload, DownloadRequest, FailedDownload, Outcome,
    TransferReceipt,
};
pub use transfer::Transfer;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
