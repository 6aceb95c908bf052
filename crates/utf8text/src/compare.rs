//! Ordering of terminated strings.
//!
//! Byte-wise comparison of well-formed UTF-8 orders strings exactly like a
//! scalar-by-scalar comparison would, so the unbounded case-sensitive
//! routines never decode. Length-bounded and case-insensitive comparisons
//! have to count or fold scalars and decode as they go.
//!
//! In every routine the shorter string orders as if padded with `U+0000`.
//! Case folding covers ASCII letters only; other caseful scalars compare by
//! value.

use core::cmp::Ordering;

use crate::{NO_LIMIT, decoder::decode, metrics::terminated};

/// Compares two strings.
///
/// ```rust
/// use core::cmp::Ordering;
/// use utf8text::str_cmp;
///
/// assert_eq!(str_cmp(b"a", b"b"), Ordering::Less);
/// assert_eq!(str_cmp(b"abc", b"ab"), Ordering::Greater);
/// assert_eq!(str_cmp(b"abc", b"abc\0junk"), Ordering::Equal);
/// ```
#[must_use]
pub fn str_cmp(s1: &[u8], s2: &[u8]) -> Ordering {
    terminated(s1).cmp(terminated(s2))
}

/// Compares at most the first `max_len` scalars of two strings.
#[must_use]
pub fn str_lcmp(s1: &[u8], s2: &[u8], max_len: usize) -> Ordering {
    compare_scalars(s1, s2, max_len, core::convert::identity)
}

/// Compares two strings, ignoring the case of ASCII letters.
#[must_use]
pub fn str_casecmp(s1: &[u8], s2: &[u8]) -> Ordering {
    compare_scalars(s1, s2, NO_LIMIT, fold_ascii)
}

/// Compares at most the first `max_len` scalars of two strings, ignoring the
/// case of ASCII letters.
#[must_use]
pub fn str_lcasecmp(s1: &[u8], s2: &[u8], max_len: usize) -> Ordering {
    compare_scalars(s1, s2, max_len, fold_ascii)
}

/// Whether `p` is a prefix of `s`. The empty string is a prefix of every
/// string.
#[must_use]
pub fn str_test_prefix(s: &[u8], p: &[u8]) -> bool {
    terminated(s).starts_with(terminated(p))
}

/// Byte offset of the suffix of `s` that follows its first `prefix_length`
/// scalars. Returns the offset of the terminator if `s` is shorter.
#[must_use]
pub fn str_suffix(s: &[u8], prefix_length: usize) -> usize {
    crate::metrics::str_lsize(s, prefix_length)
}

#[inline]
fn fold_ascii(ch: u32) -> u32 {
    if (u32::from(b'A')..=u32::from(b'Z')).contains(&ch) {
        ch + 0x20
    } else {
        ch
    }
}

fn compare_scalars(s1: &[u8], s2: &[u8], max_len: usize, fold: impl Fn(u32) -> u32) -> Ordering {
    let mut off1 = 0;
    let mut off2 = 0;

    for _ in 0..max_len {
        let c1 = fold(decode(s1, &mut off1, NO_LIMIT));
        let c2 = fold(decode(s2, &mut off2, NO_LIMIT));

        match c1.cmp(&c2) {
            Ordering::Equal if c1 == 0 => break,
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }

    Ordering::Equal
}
