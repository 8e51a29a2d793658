//! Download engine for bounded-concurrency batch downloads.
//!
//! This module provides the `DownloadEngine` which fans a list of URLs out
//! to one Tokio task per URL, gates them with an [`AdmissionLimiter`], and
//! fans the per-item [`Outcome`]s back in over a channel.
//!
//! # Overview
//!
//! A run moves through `Dispatching → Collecting → Finalizing`:
//!
//! - `launch_workers` spawns every task up front. Each task waits
//!   for a slot, runs one [`Transfer`], releases the slot, and sends exactly
//!   one outcome.
//! - `track_completion` joins every task and drops the last
//!   sender, which closes the channel once and only once.
//! - `collect_outcomes` is the only owner of the
//!   [`AggregateReport`] and drains the channel until it closes.
//!
//! Per-item failures never fail the run; they land in the report.
//!
//! # Example
//!
//! ```no_run
//! use bulkdl_core::download::{DownloadEngine, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(4, HttpClient::new())?;
//! let urls = ["https://example.com/a.pdf", "https://example.com/b.pdf"];
//! let report = engine.process(urls, Path::new("./downloads")).await?;
//! println!("{} bytes, {} failed", report.total_bytes(), report.failed());
//! report.into_result()?;
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod worker;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::constants::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use super::limiter::AdmissionLimiter;
use super::outcome::{AggregateReport, DownloadRequest, Outcome};
use super::transfer::Transfer;

/// Error type for download engine operations.
///
/// Only problems that stop a whole run live here; per-item failures are
/// reported through [`AggregateReport`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The destination directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Download engine for bounded-concurrency batch downloads.
///
/// # Concurrency Model
///
/// - Each URL runs in its own Tokio task, all spawned eagerly
/// - A limiter slot is acquired before the transfer starts
/// - Slots are released automatically when the transfer returns (RAII)
/// - Outcomes travel over an mpsc channel to a single consumer
pub struct DownloadEngine {
    limiter: AdmissionLimiter,
    transfer: Arc<dyn Transfer>,
}

impl std::fmt::Debug for DownloadEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadEngine")
            .field("concurrency", &self.limiter.capacity())
            .finish_non_exhaustive()
    }
}

impl DownloadEngine {
    /// Creates an engine that downloads over HTTP with `client`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use bulkdl_core::download::{DownloadEngine, HttpClient};
    ///
    /// let engine = DownloadEngine::new(10, HttpClient::new()).unwrap();
    /// assert_eq!(engine.concurrency(), 10);
    /// ```
    #[instrument(level = "debug", skip(client))]
    pub fn new(concurrency: usize, client: HttpClient) -> Result<Self, EngineError> {
        Self::with_transfer(concurrency, Arc::new(client))
    }

    /// Creates an engine around any [`Transfer`] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    pub fn with_transfer(
        concurrency: usize,
        transfer: Arc<dyn Transfer>,
    ) -> Result<Self, EngineError> {
        let limiter = AdmissionLimiter::new(concurrency)?;
        debug!(concurrency, "creating download engine");
        Ok(Self { limiter, transfer })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.limiter.capacity()
    }

    /// Downloads every URL into `output_dir` and returns the tally.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CreateOutputDir`] if the directory cannot be
    /// created. Individual download failures do NOT cause this method to
    /// error; use [`AggregateReport::into_result`] for the batch verdict.
    pub async fn process<I, S>(
        &self,
        urls: I,
        output_dir: &Path,
    ) -> Result<AggregateReport, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process_with(urls, output_dir, |_| {}).await
    }

    /// Same as [`process`](Self::process), calling `on_outcome` for every
    /// outcome as it arrives.
    ///
    /// Arrival order follows completion order, not input order.
    ///
    /// An empty URL list returns an empty report without creating
    /// `output_dir`, so an uncreatable directory is only an error when there
    /// is something to download.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CreateOutputDir`] if the directory cannot be created.
    #[instrument(skip(self, urls, on_outcome), fields(output_dir = %output_dir.display()))]
    pub async fn process_with<I, S, F>(
        &self,
        urls: I,
        output_dir: &Path,
        on_outcome: F,
    ) -> Result<AggregateReport, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&Outcome),
    {
        let started = Instant::now();
        let requests: Vec<DownloadRequest> = urls
            .into_iter()
            .map(|url| DownloadRequest::new(url, output_dir))
            .collect();

        if requests.is_empty() {
            info!("no URLs to download");
            let mut report = AggregateReport::new();
            report.finish(started.elapsed());
            return Ok(report);
        }

        create_output_dir(output_dir).await?;

        info!(
            count = requests.len(),
            concurrency = self.concurrency(),
            "starting batch download"
        );

        // Capacity N: a worker's single send never waits on the consumer.
        let (sender, receiver) = mpsc::channel(requests.len());
        let handles = worker::launch_workers(requests, &self.limiter, &self.transfer, &sender);
        let tracker = tokio::spawn(worker::track_completion(handles, sender));

        let report = aggregate::collect_outcomes(receiver, started, on_outcome).await;

        if let Err(e) = tracker.await {
            warn!(error = %e, "completion tracker panicked");
        }

        Ok(report)
    }
}

async fn create_output_dir(path: &Path) -> Result<(), EngineError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| EngineError::CreateOutputDir {
            path: path.to_path_buf(),
            source,
        })
}
