//! Bulk downloader core library
//!
//! This library fetches a list of URLs over HTTP into a local directory,
//! running a bounded number of transfers at once and folding every per-file
//! result into one report.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - Transfer unit, admission limiter, and batch engine
//! - [`parser`] - URL list parsing from free-form text

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod parser;
mod user_agent;

// Re-export commonly used types
pub use download::{
    AggregateReport, BatchError, DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, EngineError,
    FailureKind, HttpClient, Outcome,
};
pub use parser::{ParseResult, parse_input};
