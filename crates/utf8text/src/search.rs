//! Character and substring search. Results are byte offsets into the
//! haystack.

use crate::{
    NO_LIMIT,
    compare::str_test_prefix,
    decoder::Scalars,
    encoder::encode_to_array,
    metrics::{str_size, terminated},
    scalar::{ascii_check, chr_check},
};

/// Byte offset of the first occurrence of `ch` in `s`.
///
/// Searching for `0` finds the terminator.
///
/// ```rust
/// use utf8text::str_chr;
///
/// assert_eq!(str_chr("kůň".as_bytes(), 'ň' as u32), Some(3));
/// assert_eq!(str_chr(b"abc", 'x' as u32), None);
/// ```
#[must_use]
pub fn str_chr(s: &[u8], ch: u32) -> Option<usize> {
    let s = terminated(s);

    if ch == 0 {
        return Some(s.len());
    }

    if ascii_check(ch) {
        return memchr::memchr(u8::try_from(ch).ok()?, s);
    }

    let (utf8, len) = encode_to_array(ch).ok()?;
    let needle = &utf8[..len];

    // A matching leading byte is only a candidate; the whole sequence has to
    // match.
    let mut from = 0;
    while let Some(found) = memchr::memchr(needle[0], &s[from..]) {
        let at = from + found;
        if str_test_prefix(&s[at..], needle) {
            return Some(at);
        }
        from = at + 1;
    }

    None
}

/// Byte offset of the last occurrence of `ch` in `s`.
#[must_use]
pub fn str_rchr(s: &[u8], ch: u32) -> Option<usize> {
    // Malformed sequences decode to `INVALID`; never report them as a match.
    if !chr_check(ch) {
        return None;
    }

    if ch == 0 {
        return Some(str_size(s));
    }

    if ascii_check(ch) {
        return memchr::memrchr(u8::try_from(ch).ok()?, terminated(s));
    }

    Scalars::new(s, NO_LIMIT)
        .filter(|&(_, _, c)| c == ch)
        .last()
        .map(|(start, _, _)| start)
}

/// Byte offset of the first occurrence of `needle` in `haystack`. An empty
/// needle matches at offset `0`.
#[must_use]
pub fn str_str(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memchr::memmem::find(terminated(haystack), terminated(needle))
}
