//! Filename normalization for stored uploads.

use unicode_normalization::UnicodeNormalization;

/// Name used when nothing safe survives sanitization.
pub const FALLBACK_FILENAME: &str = "upload.pdf";

/// Reduce a client-supplied filename to a flat, portable name.
///
/// Compatibility-decomposes the input and drops non-ASCII characters, turns path separators
/// into whitespace, joins whitespace runs with `_`, removes anything outside `[A-Za-z0-9_.-]`
/// and trims leading/trailing `.` and `_`. The result never contains a path separator and
/// never starts with `.`, so it cannot escape the upload directory. Returns `None` when nothing
/// remains.
pub fn secure_filename(raw: &str) -> Option<String> {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if matches!(c, '/' | '\\') { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(|c| matches!(c, '.' | '_'));

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// [`secure_filename`] with [`FALLBACK_FILENAME`] substituted for an empty result.
pub fn storage_filename(raw: &str) -> String {
    secure_filename(raw).unwrap_or_else(|| {
        tracing::debug!(raw, "Filename sanitized to nothing; using fallback");
        FALLBACK_FILENAME.to_string()
    })
}
