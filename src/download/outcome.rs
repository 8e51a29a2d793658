//! Request, outcome, and report types for a download batch.
//!
//! A [`DownloadRequest`] is built once per input URL before dispatch. Each
//! worker turns its request into exactly one [`Outcome`], which the engine's
//! aggregator folds into the [`AggregateReport`]. Nothing else mutates the
//! report.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::error::DownloadError;

/// One URL to fetch into one destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
    output_dir: PathBuf,
}

impl DownloadRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Source URL as given by the caller.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Destination directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// What a successful transfer produced on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Full path of the written file.
    pub path: PathBuf,
    /// Bytes written, equal to the response body length.
    pub bytes: u64,
}

impl TransferReceipt {
    /// Final path component of [`TransferReceipt::path`].
    #[must_use]
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedDownload {
    /// Source URL.
    pub url: String,
    /// Destination filename (no directory).
    pub filename: String,
    /// Full destination path.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes: u64,
    /// Time spent in this transfer only, excluding time queued for a slot.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

/// A download that did not produce a file.
#[derive(Debug)]
pub struct FailedDownload {
    /// Source URL.
    pub url: String,
    /// Why it failed.
    pub error: DownloadError,
}

impl Serialize for FailedDownload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FailedDownload", 4)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("kind", &self.error.kind())?;
        state.serialize_field("status", &self.error.status())?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

impl fmt::Display for FailedDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.error)
    }
}

/// Result of one worker: success or failure, never both.
#[derive(Debug)]
pub enum Outcome {
    /// File written in full.
    Success(CompletedDownload),
    /// No file left behind; cause attached.
    Failure(FailedDownload),
}

impl Outcome {
    /// Builds an outcome from a transfer result and the transfer's own elapsed time.
    #[must_use]
    pub fn from_transfer(
        url: impl Into<String>,
        result: Result<TransferReceipt, DownloadError>,
        elapsed: Duration,
    ) -> Self {
        let url = url.into();
        match result {
            Ok(receipt) => Self::Success(CompletedDownload {
                filename: receipt.filename(),
                url,
                path: receipt.path,
                bytes: receipt.bytes,
                elapsed,
            }),
            Err(error) => Self::Failure(FailedDownload { url, error }),
        }
    }

    /// Source URL of either variant.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Success(done) => &done.url,
            Self::Failure(failed) => &failed.url,
        }
    }

    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Tally of one orchestration run.
///
/// Failures are kept in arrival order, which depends on scheduling and
/// generally differs from input order.
#[derive(Debug, Default, Serialize)]
pub struct AggregateReport {
    total_bytes: u64,
    successes: Vec<CompletedDownload>,
    failures: Vec<FailedDownload>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

impl AggregateReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outcome into the tally.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(done) => {
                self.total_bytes = self.total_bytes.saturating_add(done.bytes);
                self.successes.push(done);
            }
            Outcome::Failure(failed) => self.failures.push(failed),
        }
    }

    /// Stamps the wall-clock duration of the whole run.
    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Sum of bytes over all successful downloads.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Successful downloads in arrival order.
    #[must_use]
    pub fn successes(&self) -> &[CompletedDownload] {
        &self.successes
    }

    /// Failed downloads in arrival order.
    #[must_use]
    pub fn failures(&self) -> &[FailedDownload] {
        &self.failures
    }

    /// Number of successful downloads.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of outcomes recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }

    /// Wall-clock duration from dispatch to the end of collection.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns true when nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the report into the batch's final error value.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] carrying every failure when at least one item failed.
    pub fn into_result(self) -> Result<Self, BatchError> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        Err(BatchError {
            succeeded: self.successes.len(),
            total_bytes: self.total_bytes,
            failures: self.failures,
        })
    }
}

/// Every per-item failure of a batch, bundled into one error.
#[derive(Debug, thiserror::Error)]
#[error("{}", render_batch(.failures, *.succeeded))]
pub struct BatchError {
    failures: Vec<FailedDownload>,
    succeeded: usize,
    total_bytes: u64,
}

impl BatchError {
    /// All failures, arrival order.
    #[must_use]
    pub fn failures(&self) -> &[FailedDownload] {
        &self.failures
    }

    /// Number of items that still succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Bytes written by the items that succeeded.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

/// "k of n downloads failed" followed by one indented line per failure.
fn render_batch(failures: &[FailedDownload], succeeded: usize) -> String {
    let total = failures.len() + succeeded;
    let mut message = format!("{} of {total} downloads failed", failures.len());
    for failure in failures {
        message.push_str(&format!("\n  - {failure}"));
    }
    message
}

fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}
