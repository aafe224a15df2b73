//! Fixed-size chunking measured in Unicode scalar values.

/// Code points per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Split `text` into consecutive chunks of `chunk_size` code points.
///
/// Every chunk except possibly the last is exactly `chunk_size` long and the
/// chunks concatenate back to `text`. Empty input yields no chunks. A
/// `chunk_size` of zero is treated as one.
#[must_use]
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;

    while start < text.len() {
        let end = text[start..]
            .char_indices()
            .nth(chunk_size)
            .map_or(text.len(), |(offset, _)| start + offset);
        chunks.push(&text[start..end]);
        start = end;
    }

    chunks
}
