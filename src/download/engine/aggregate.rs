use std::time::Instant;

use tokio::sync::mpsc::Receiver;
use tracing::{info, warn};

use crate::download::outcome::{AggregateReport, Outcome};

/// Drains the channel until every sender is gone, folding each outcome in.
pub(super) async fn collect_outcomes<F>(
    mut receiver: Receiver<Outcome>,
    started: Instant,
    mut on_outcome: F,
) -> AggregateReport
where
    F: FnMut(&Outcome),
{
    let mut report = AggregateReport::new();

    while let Some(outcome) = receiver.recv().await {
        log_outcome(&outcome);
        on_outcome(&outcome);
        report.record(outcome);
    }

    report.finish(started.elapsed());
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        total_bytes = report.total_bytes(),
        elapsed_ms = report.elapsed().as_millis(),
        "all downloads finished"
    );
    report
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Success(done) => info!(
            url = %done.url,
            filename = %done.filename,
            bytes = done.bytes,
            elapsed_ms = done.elapsed.as_millis(),
            "downloaded"
        ),
        Outcome::Failure(failed) => warn!(
            url = %failed.url,
            kind = %failed.error.kind(),
            error = %failed.error,
            "download failed"
        ),
    }
}
