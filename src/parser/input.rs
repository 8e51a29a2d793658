//! Types representing a parsed URL list.

use std::fmt;

use super::error::ParseError;

/// A single URL taken from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    /// Text as it appeared in the input
    pub raw: String,
    /// Validated, normalized URL
    pub value: String,
}

impl ParsedItem {
    /// Creates a new parsed item.
    #[must_use]
    pub fn new(raw: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ParsedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Everything extracted from one input text, in input order.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Accepted URLs; duplicates are kept
    pub items: Vec<ParsedItem>,
    /// Non-comment lines that contained no URL
    pub skipped: Vec<String>,
    /// URL candidates that failed validation
    pub rejected: Vec<ParseError>,
}

impl ParseResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no URLs were accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns count of accepted URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the accepted URLs as strings, in input order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.items.iter().map(|item| item.value.clone()).collect()
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parsed {} URLs ({} skipped, {} rejected)",
            self.items.len(),
            self.skipped.len(),
            self.rejected.len()
        )
    }
}
