//! Progress bar for download runs.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Whether a progress bar should be drawn for this run.
pub(crate) fn should_show_progress(no_progress: bool, quiet: bool, json: bool) -> bool {
    !no_progress && !quiet && !json && io::stderr().is_terminal()
}

/// Builds the batch progress bar, or a hidden one when `visible` is false.
///
/// Lines printed through [`ProgressBar::println`] on a hidden bar are dropped,
/// so callers print directly in that case.
pub(crate) fn batch_progress(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_bar} {elapsed_precise} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
