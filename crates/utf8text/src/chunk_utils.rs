use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks.
///
/// Unlike a text splitter this cuts at arbitrary byte offsets, including the
/// middle of a multi-byte sequence, which is what a streaming decoder has to
/// cope with.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}
