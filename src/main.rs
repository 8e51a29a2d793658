//! CLI entry point for the bulk downloader.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use bulkdl_core::{DownloadEngine, HttpClient, Outcome, parse_input};
use clap::Parser;
use tracing::{debug, info, warn};

mod cli;
mod exit_handler;
mod output;
mod progress;

use cli::Args;
use exit_handler::determine_exit_outcome;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let Some(input_text) = read_input(&args)? else {
        eprintln!("{}", output::NO_INPUT_GUIDANCE);
        eprintln!("{}", output::INPUT_ARG_EXAMPLE);
        return Ok(());
    };

    let parsed = parse_input(&input_text);
    for line in &parsed.skipped {
        debug!(line = %line, "skipped line without URL");
    }
    for rejected in &parsed.rejected {
        warn!(error = %rejected, "ignoring invalid URL");
    }
    if parsed.is_empty() {
        info!("No valid URLs found in input");
        return Ok(());
    }

    let client = HttpClient::new_with_timeouts(args.connect_timeout, args.read_timeout);
    let engine = DownloadEngine::new(usize::from(args.concurrency), client)
        .context("invalid concurrency")?;

    let show_progress = progress::should_show_progress(args.no_progress, args.quiet, args.json);
    let bar = progress::batch_progress(parsed.len(), show_progress);
    let print_success = !args.quiet && !args.json;

    let report = engine
        .process_with(parsed.urls(), &args.output_dir, |outcome| {
            let line = output::outcome_line(outcome);
            match outcome {
                Outcome::Success(_) if print_success => emit(&bar, show_progress, &line, false),
                Outcome::Success(_) => {}
                Outcome::Failure(_) => emit(&bar, show_progress, &line, true),
            }
            bar.inc(1);
        })
        .await
        .with_context(|| output_dir_context(&args.output_dir))?;
    bar.finish_and_clear();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else if !args.quiet {
        println!("{}", output::summary_line(&report));
    }

    let exit = determine_exit_outcome(report.succeeded(), report.failed());
    debug!(?exit, "batch finished");
    if exit.code() != 0 {
        std::process::exit(exit.code());
    }
    Ok(())
}

/// Collects raw input text: positional URLs, then `--input-file`, then piped stdin.
fn read_input(args: &Args) -> Result<Option<String>> {
    if !args.urls.is_empty() {
        return Ok(Some(args.urls.join("\n")));
    }

    if let Some(path) = &args.input_file {
        if path.as_os_str() == "-" {
            return read_stdin().map(Some);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        return Ok(Some(text));
    }

    if io::stdin().is_terminal() {
        return Ok(None);
    }
    read_stdin().map(Some)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read URLs from stdin")?;
    Ok(buffer)
}

fn emit(bar: &indicatif::ProgressBar, show_progress: bool, line: &str, is_error: bool) {
    if show_progress {
        bar.println(line);
    } else if is_error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

fn output_dir_context(dir: &Path) -> String {
    format!("cannot download into {}", dir.display())
}
