//! URL extraction and validation from text input.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use url::Url;

use super::error::{MAX_URL_LENGTH, ParseError};
use super::input::ParsedItem;

/// Anything shaped like `scheme://...`, up to whitespace or common delimiters.
/// Non-web schemes are matched on purpose so they can be reported.
#[allow(clippy::expect_used)]
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[A-Za-z][A-Za-z0-9+.\-]*://[^\s<>"'\]]+"#).expect("URL regex is valid") // Static pattern, safe to panic
});

/// Result type for URL extraction operations.
pub type UrlExtractionResult = Result<ParsedItem, ParseError>;

/// Extracts and validates every URL candidate in `input`.
///
/// Each candidate is validated on its own, so some may succeed while
/// others fail.
///
/// # Examples
///
/// ```
/// use bulkdl_core::parser::extract_urls;
///
/// let results = extract_urls("Check out https://example.com/doc.pdf for details");
/// assert_eq!(results.len(), 1);
/// assert!(results[0].is_ok());
/// ```
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn extract_urls(input: &str) -> Vec<UrlExtractionResult> {
    URL_PATTERN
        .find_iter(input)
        .map(|url_match| {
            let raw_url = url_match.as_str();
            let cleaned = clean_url_trailing(raw_url);
            trace!(url = %cleaned, "found URL candidate");

            validate_url(cleaned)
                .inspect(|validated| debug!(url = %validated, "URL validated"))
                .inspect_err(|e| debug!(url = %cleaned, error = %e, "URL validation failed"))
                .map(|validated| ParsedItem::new(raw_url, validated))
        })
        .collect()
}

/// Strips sentence punctuation and unbalanced closing brackets captured at the end.
fn clean_url_trailing(url: &str) -> &str {
    let mut result = url;

    while let Some(last) = result.chars().last() {
        match last {
            '.' | ',' | ';' | ':' | '!' | '?' => {
                result = &result[..result.len() - 1];
            }
            ')' | ']' => {
                let open = if last == ')' { '(' } else { '[' };
                let open_count = result.chars().filter(|&c| c == open).count();
                let close_count = result.chars().filter(|&c| c == last).count();
                if close_count > open_count {
                    result = &result[..result.len() - 1];
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    result
}

/// Validates a URL string and normalizes it.
///
/// # Validation rules:
/// - Must not exceed `MAX_URL_LENGTH` (2000 chars)
/// - Must be parseable by the `url` crate
/// - Must use http or https scheme
/// - Must have a host (domain or IP)
fn validate_url(raw: &str) -> Result<String, ParseError> {
    if raw.len() > MAX_URL_LENGTH {
        return Err(ParseError::too_long(raw));
    }

    let parsed = Url::parse(raw).map_err(|e| ParseError::malformed(raw, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ParseError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: scheme.to_string(),
            });
        }
    }

    if parsed.host().is_none() {
        return Err(ParseError::NoHost {
            url: raw.to_string(),
        });
    }

    Ok(parsed.to_string())
}
