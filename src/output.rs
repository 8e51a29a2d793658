//! CLI output formatting and display helpers.

use std::time::Duration;

use bulkdl_core::{AggregateReport, Outcome};

/// Message when no input was provided at all.
pub const NO_INPUT_GUIDANCE: &str = "No input provided. Pass URLs as arguments, use --input-file, or pipe them via stdin.";

/// Example for passing URLs as arguments.
pub const INPUT_ARG_EXAMPLE: &str = "Example: bulkdl -o downloads https://example.com/file.pdf";

/// Formats a byte count with binary units ("1.5 KiB").
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Formats a duration as milliseconds below one second, else seconds with two decimals.
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// One line per finished item.
pub fn outcome_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success(done) => format!(
            "Downloaded {} ({}, {} bytes) in {}",
            done.filename,
            format_bytes(done.bytes),
            done.bytes,
            format_duration(done.elapsed)
        ),
        Outcome::Failure(failed) => {
            format!("Error downloading {}: {}", failed.url, failed.error)
        }
    }
}

/// Final summary line.
pub fn summary_line(report: &AggregateReport) -> String {
    let mut line = format!(
        "All downloads completed in {}, Total: {} bytes ({})",
        format_duration(report.elapsed()),
        report.total_bytes(),
        format_bytes(report.total_bytes())
    );
    if report.failed() > 0 {
        line.push_str(&format!(
            " - {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        ));
    }
    line
}
