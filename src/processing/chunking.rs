//! Fixed-width character chunking.
//!
//! Long documents are cut into consecutive windows of [`CHUNK_CHARS`] characters. Offsets count
//! Unicode scalar values, never bytes, so multi-byte text is never split inside a code point.
//! Boundaries ignore sentence and word structure: a word can straddle two chunks, and each half
//! is summarized independently.

/// Characters per chunk; documents longer than this are summarized chunk by chunk.
pub const CHUNK_CHARS: usize = 1000;

/// Split `text` into consecutive windows of `width` characters. The last window may be shorter.
///
/// Returns an empty vector for empty input or a zero width.
pub fn chunk_by_chars(text: &str, width: usize) -> Vec<&str> {
    if width == 0 || text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in text.char_indices() {
        if count == width {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}

/// Whether `text` is long enough to be summarized chunk by chunk.
pub fn needs_chunking(text: &str) -> bool {
    text.chars().nth(CHUNK_CHARS).is_some()
}
