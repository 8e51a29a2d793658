//! Errors for URL list entries that cannot be downloaded.

use thiserror::Error;

/// Maximum URL length to accept (standard browser limit).
pub const MAX_URL_LENGTH: usize = 2000;

/// Why a URL candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Candidate did not parse as an absolute URL.
    #[error("invalid URL '{url}': {reason}")]
    Malformed {
        /// The rejected text.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Scheme other than http/https.
    #[error("unsupported scheme '{scheme}' in '{url}' (use http:// or https://)")]
    UnsupportedScheme {
        /// The rejected URL.
        url: String,
        /// Its scheme.
        scheme: String,
    },

    /// URL has no host component.
    #[error("URL '{url}' has no host")]
    NoHost {
        /// The rejected URL.
        url: String,
    },

    /// URL exceeds [`MAX_URL_LENGTH`].
    #[error("URL too long ({length} chars, max {MAX_URL_LENGTH}): {preview}...")]
    TooLong {
        /// First 50 characters.
        preview: String,
        /// Actual length.
        length: usize,
    },
}

impl ParseError {
    /// Creates a [`ParseError::Malformed`].
    #[must_use]
    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a [`ParseError::TooLong`].
    #[must_use]
    pub fn too_long(url: &str) -> Self {
        Self::TooLong {
            preview: url.chars().take(50).collect(),
            length: url.len(),
        }
    }
}
