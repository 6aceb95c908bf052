//! Size, length and width of byte, wide and UTF-16 strings.
//!
//! Every counter that decodes treats a malformed sequence as one unit. The
//! decoder consumes at least one byte per malformed sequence, so counting
//! always terminates.

use crate::{
    NO_LIMIT,
    decoder::Scalars,
    scalar::chr_width,
};

const WCHAR_SIZE: usize = core::mem::size_of::<u32>();

/// The string proper: everything before the terminator.
#[inline]
pub(crate) fn terminated(s: &[u8]) -> &[u8] {
    &s[..str_size(s)]
}

/// Number of bytes in `s`, excluding the terminator.
#[must_use]
pub fn str_size(s: &[u8]) -> usize {
    memchr::memchr(0, s).unwrap_or(s.len())
}

/// Number of bytes in `s`, excluding the terminator, but no more than
/// `max_size`.
#[must_use]
pub fn str_nsize(s: &[u8], max_size: usize) -> usize {
    str_size(&s[..max_size.min(s.len())])
}

/// Number of bytes taken by the first `max_len` scalars of `s`. The whole
/// string is measured if it is shorter.
#[must_use]
pub fn str_lsize(s: &[u8], max_len: usize) -> usize {
    let mut scalars = Scalars::new(s, NO_LIMIT);
    for _ in scalars.by_ref().take(max_len) {}
    scalars.offset()
}

/// Number of scalars in `s`.
#[must_use]
pub fn str_length(s: &[u8]) -> usize {
    str_nlength(s, NO_LIMIT)
}

/// Number of scalars in at most the first `size` bytes of `s`.
#[must_use]
pub fn str_nlength(s: &[u8], size: usize) -> usize {
    Scalars::new(s, size).count()
}

/// Number of display cells taken by `s`.
#[must_use]
pub fn str_width(s: &[u8]) -> usize {
    Scalars::new(s, NO_LIMIT).map(|(_, _, ch)| chr_width(ch)).sum()
}

/// Number of scalars in the wide string `s`.
#[must_use]
pub fn wstr_length(s: &[u32]) -> usize {
    s.iter().position(|&ch| ch == 0).unwrap_or(s.len())
}

/// Number of scalars in the wide string `s` that fit in `size` bytes.
#[must_use]
pub fn wstr_nlength(s: &[u32], size: usize) -> usize {
    let limit = (size / WCHAR_SIZE).min(s.len());
    wstr_length(&s[..limit])
}

/// Number of bytes in the wide string `s`, excluding the terminator.
#[must_use]
pub fn wstr_size(s: &[u32]) -> usize {
    wstr_length(s) * WCHAR_SIZE
}

/// Number of bytes in the wide string `s`, excluding the terminator, but no
/// more than `max_size` (rounded down to whole scalars).
#[must_use]
pub fn wstr_nsize(s: &[u32], max_size: usize) -> usize {
    wstr_nlength(s, max_size) * WCHAR_SIZE
}

/// Number of bytes taken by the first `max_len` scalars of the wide string
/// `s`.
#[must_use]
pub fn wstr_lsize(s: &[u32], max_len: usize) -> usize {
    wstr_nlength(s, max_len.saturating_mul(WCHAR_SIZE)) * WCHAR_SIZE
}

/// Number of display cells taken by the wide string `s`.
#[must_use]
pub fn wstr_width(s: &[u32]) -> usize {
    s[..wstr_length(s)].iter().map(|&ch| chr_width(ch)).sum()
}

/// Number of 16-bit units in the UTF-16 string `s`, excluding the
/// terminator.
#[must_use]
pub fn utf16_wsize(s: &[u16]) -> usize {
    s.iter().position(|&unit| unit == 0).unwrap_or(s.len())
}
