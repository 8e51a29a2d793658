//! Filename derivation and sanitization for downloads.
//!
//! The destination filename is a pure function of the URL: the last non-empty
//! path segment, percent-decoded and made filesystem-safe. The same URL always
//! maps to the same name, so no timestamp or existence check is involved.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use url::Url;

use super::constants::FALLBACK_FILENAME;

/// Derives the destination filename for a URL.
///
/// Resolution order:
/// 1. Last non-empty path segment (trailing slashes are skipped)
/// 2. Host name with dots replaced by dashes
/// 3. [`FALLBACK_FILENAME`]
#[must_use]
pub fn filename_from_url(url: &Url) -> String {
    let last_segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back());

    if let Some(segment) = last_segment {
        let decoded = urlencoding::decode(segment).unwrap_or_else(|e| {
            debug!(
                segment = %segment,
                error = %e,
                "URL decoding failed, using raw segment"
            );
            segment.into()
        });
        return sanitize_filename(&decoded);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => sanitize_filename(&host.replace('.', "-")),
        _ => FALLBACK_FILENAME.to_string(),
    }
}

/// Joins the derived filename onto `dir`.
#[must_use]
pub fn destination_path(dir: &Path, url: &Url) -> PathBuf {
    dir.join(filename_from_url(url))
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
