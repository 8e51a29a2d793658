use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::download::limiter::AdmissionLimiter;
use crate::download::outcome::{DownloadRequest, Outcome};
use crate::download::transfer::Transfer;
use crate::download::DownloadError;

/// A spawned worker and the URL it owns, kept for panic reporting.
pub(super) type WorkerHandle = (String, JoinHandle<()>);

/// Spawns one task per request; each holds its own sender clone.
pub(super) fn launch_workers(
    requests: Vec<DownloadRequest>,
    limiter: &AdmissionLimiter,
    transfer: &Arc<dyn Transfer>,
    sender: &Sender<Outcome>,
) -> Vec<WorkerHandle> {
    requests
        .into_iter()
        .map(|request| {
            let url = request.url().to_string();
            let limiter = limiter.clone();
            let transfer = Arc::clone(transfer);
            let sender = sender.clone();
            let handle = tokio::spawn(run_worker(request, limiter, transfer, sender));
            (url, handle)
        })
        .collect()
}

/// Emission is the last step and happens on every path.
#[instrument(skip_all, fields(url = %request.url()))]
async fn run_worker(
    request: DownloadRequest,
    limiter: AdmissionLimiter,
    transfer: Arc<dyn Transfer>,
    sender: Sender<Outcome>,
) {
    let outcome = admit_and_transfer(&request, &limiter, transfer.as_ref()).await;
    if sender.send(outcome).await.is_err() {
        warn!("result channel closed before outcome was delivered");
    }
}

async fn admit_and_transfer(
    request: &DownloadRequest,
    limiter: &AdmissionLimiter,
    transfer: &dyn Transfer,
) -> Outcome {
    let permit = match limiter.acquire().await {
        Ok(permit) => permit,
        Err(e) => {
            let error = DownloadError::task_aborted(request.url(), e.to_string());
            return Outcome::from_transfer(request.url(), Err(error), Duration::ZERO);
        }
    };

    debug!(in_flight = limiter.in_use(), "transfer started");
    let started = Instant::now();
    let result = transfer.transfer(request).await;
    let elapsed = started.elapsed();
    drop(permit);

    Outcome::from_transfer(request.url(), result, elapsed)
}

/// Joins every worker, then drops the last sender so the channel closes.
///
/// A worker that panicked never sent; it gets a failure outcome here so the
/// consumer still sees one outcome per request.
pub(super) async fn track_completion(handles: Vec<WorkerHandle>, sender: Sender<Outcome>) {
    for (url, handle) in handles {
        if let Err(join_error) = handle.await {
            warn!(url = %url, error = %join_error, "download task panicked");
            let error = DownloadError::task_aborted(&url, join_error.to_string());
            let outcome = Outcome::from_transfer(url, Err(error), Duration::ZERO);
            if sender.send(outcome).await.is_err() {
                warn!("result channel closed before panic outcome was delivered");
            }
        }
    }
    debug!("all download tasks finished; closing result channel");
    drop(sender);
}
