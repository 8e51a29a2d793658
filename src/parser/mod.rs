//! Input parsing for URL lists.
//!
//! Turns free-form text (one or more URLs per line, `#` comments, blank
//! lines, URLs embedded in prose or markdown) into an ordered list of
//! validated http(s) URLs.
//!
//! # Example
//!
//! ```
//! use bulkdl_core::parser::parse_input;
//!
//! let result = parse_input(r#"
//! ## cars
//! https://example.com/img/mustang-2.jpg
//! some text to ignore
//! https://example.com/img/mustang-4.jpg
//! "#);
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.skipped.len(), 1);
//! ```

mod error;
mod input;
mod url;

pub use error::{MAX_URL_LENGTH, ParseError};
pub use input::{ParseResult, ParsedItem};
pub use url::extract_urls;

use tracing::{debug, info};

/// Parses raw text input into an ordered URL list.
///
/// # Behavior
///
/// - Empty input returns an empty result (not an error)
/// - Lines starting with `#` are comments
/// - Every URL on a line is taken, in order; duplicates are kept
/// - Lines with no URL candidate are recorded in `skipped`
/// - Invalid candidates are recorded in `rejected` and don't fail parsing
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_input(input: &str) -> ParseResult {
    let mut result = ParseResult::new();

    if input.trim().is_empty() {
        debug!("Empty input provided");
        return result;
    }

    for line in input.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let candidates = extract_urls(line);
        if candidates.is_empty() {
            debug!(line = %line, "no URL on line");
            result.skipped.push(line.to_string());
            continue;
        }

        for candidate in candidates {
            match candidate {
                Ok(item) => result.items.push(item),
                Err(e) => result.rejected.push(e),
            }
        }
    }

    info!(
        urls = result.items.len(),
        skipped = result.skipped.len(),
        rejected = result.rejected.len(),
        "parsed input"
    );

    result
}
