//! Bounded copies, trimming and tokenizing of terminated strings in caller
//! buffers, plus the few helpers that allocate.
//!
//! Every routine that writes a byte string leaves it well-formed: terminated
//! within the destination and free of partial sequences, even when the
//! source had to be truncated.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::{
    NO_LIMIT,
    decoder::{Scalars, decode},
    error::SpasciiError,
    metrics::{str_nsize, str_size, wstr_length},
    sanitize::sanitize,
    scalar::{U_SPECIAL, ascii_check, chr_check},
    search::str_chr,
};

/// Allocates an empty vector able to hold exactly `len` elements, or `None`
/// if the allocator refuses.
pub(crate) fn try_alloc<T>(len: usize) -> Option<Vec<T>> {
    let mut v = Vec::new();
    if v.try_reserve_exact(len).is_err() {
        log::warn!("failed to allocate {len} element(s)");
        return None;
    }
    Some(v)
}

/// Copies at most `dest.len() - 1` bytes of `src`, then terminates.
fn copy_bounded(dest: &mut [u8], src: &[u8], src_size: usize) -> usize {
    let n = src_size.min(dest.len() - 1);
    dest[..n].copy_from_slice(&src[..n]);
    dest[n] = 0;

    if n < src_size {
        log::trace!("truncated {src_size}-byte string to {n} byte(s)");
    }
    n
}

/// Copies `src` into `dest`, returning the size of the result.
///
/// At most `dest.len() - 1` bytes are copied and the result is always
/// terminated. Bytes that do not form complete, well-formed sequences
/// (including a sequence cut by truncation) are replaced by [`U_SPECIAL`].
///
/// # Panics
///
/// Panics if `dest` is empty: there must be room for the terminator.
pub fn str_cpy(dest: &mut [u8], src: &[u8]) -> usize {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let n = copy_bounded(dest, src, str_size(src));
    sanitize(dest, dest.len(), U_SPECIAL);
    n
}

/// Like [`str_cpy`], but reads no more than `n` bytes from `src`, which
/// therefore need not be terminated.
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn str_ncpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let n = copy_bounded(dest, src, str_nsize(src, n));
    sanitize(dest, dest.len(), U_SPECIAL);
    n
}

/// Appends `src` to the string already in `dest`, returning the size of the
/// result. The guarantees of [`str_cpy`] apply to the appended part.
///
/// If `dest` holds no terminator, it is already full and is left as is.
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn str_append(dest: &mut [u8], src: &[u8]) -> usize {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let size = str_size(dest);
    if size == dest.len() {
        return size;
    }

    let tail = &mut dest[size..];
    let n = copy_bounded(tail, src, str_size(src));
    sanitize(tail, tail.len(), U_SPECIAL);
    size + n
}

/// Removes every trailing occurrence of `ch` from `s`, returning the new
/// size. A `ch` outside the code point space matches nothing.
pub fn str_rtrim(s: &mut [u8], ch: u32) -> usize {
    let size = str_size(s);
    if !chr_check(ch) {
        return size;
    }

    let keep = if ascii_check(ch) {
        // ASCII bytes never occur inside a multi-byte sequence.
        s[..size]
            .iter()
            .rposition(|&b| u32::from(b) != ch)
            .map_or(0, |last| last + 1)
    } else {
        let mut keep = 0;
        for (_, end, c) in Scalars::new(s, size) {
            if c != ch {
                keep = end;
            }
        }
        keep
    };

    if keep < size {
        s[keep] = 0;
    }
    keep
}

/// Removes every leading occurrence of `ch` from `s`, shifting the rest of
/// the string to the front. Returns the new size.
pub fn str_ltrim(s: &mut [u8], ch: u32) -> usize {
    let size = str_size(s);
    if !chr_check(ch) {
        return size;
    }

    let skip = if ascii_check(ch) {
        s[..size]
            .iter()
            .position(|&b| u32::from(b) != ch)
            .unwrap_or(size)
    } else {
        let mut skip = 0;
        for (_, end, c) in Scalars::new(s, size) {
            if c != ch {
                break;
            }
            skip = end;
        }
        skip
    };

    if skip == 0 {
        return size;
    }

    s.copy_within(skip..size, 0);
    s[size - skip] = 0;
    size - skip
}

/// Splits the next token off `s`.
///
/// Leading delimiters are skipped and the following run of non-delimiter
/// scalars becomes the token. The delimiter that ends it is overwritten with
/// a terminator. Returns the token, or `None` when only delimiters remain,
/// together with the rest of the buffer to continue from.
///
/// ```rust
/// use utf8text::str_tok;
///
/// let mut buf = *b"  a,b ";
/// let (token, rest) = str_tok(&mut buf, b" ,");
/// assert_eq!(token, Some(&b"a"[..]));
/// let (token, rest) = str_tok(rest, b" ,");
/// assert_eq!(token, Some(&b"b"[..]));
/// let (token, _) = str_tok(rest, b" ,");
/// assert_eq!(token, None);
/// ```
pub fn str_tok<'a>(s: &'a mut [u8], delim: &[u8]) -> (Option<&'a [u8]>, &'a mut [u8]) {
    let size = str_size(s);
    let is_delim = |ch: u32| str_chr(delim, ch).is_some();

    let mut cur = 0;
    let mut tmp = 0;
    loop {
        let ch = decode(s, &mut tmp, size);
        if ch == 0 || !is_delim(ch) {
            break;
        }
        cur = tmp;
    }
    let start = cur;

    tmp = cur;
    let ch = loop {
        let ch = decode(s, &mut tmp, size);
        if ch == 0 || is_delim(ch) {
            break ch;
        }
        cur = tmp;
    };
    let end = cur;
    let next = if ch == 0 { cur } else { tmp };

    if start == end {
        return (None, &mut s[next..]);
    }

    if end < s.len() {
        s[end] = 0;
    }

    let (head, rest) = s.split_at_mut(next);
    let head: &'a [u8] = head;
    (Some(&head[start..end]), rest)
}

/// Iterates over the tokens of `s` with [`str_tok`].
pub fn str_tokens<'a, 'd>(s: &'a mut [u8], delim: &'d [u8]) -> Tokens<'a, 'd> {
    Tokens { rest: s, delim }
}

/// Iterator returned by [`str_tokens`].
pub struct Tokens<'a, 'd> {
    rest: &'a mut [u8],
    delim: &'d [u8],
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (token, rest) = str_tok(core::mem::take(&mut self.rest), self.delim);
        self.rest = rest;
        token
    }
}

impl fmt::Debug for Tokens<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("rest", &BStr::new(&self.rest[..]))
            .field("delim", &BStr::new(self.delim))
            .finish()
    }
}

/// Allocates a well-formed, terminated copy of `src`. The copy may differ
/// from `src` where `src` was malformed.
///
/// Returns `None` if the allocation fails.
#[must_use]
pub fn str_dup(src: &[u8]) -> Option<Vec<u8>> {
    str_ndup(src, NO_LIMIT)
}

/// Allocates a well-formed, terminated copy of at most the first `n` bytes
/// of `src`.
///
/// Returns `None` if the allocation fails.
#[must_use]
pub fn str_ndup(src: &[u8], n: usize) -> Option<Vec<u8>> {
    let size = str_nsize(src, n);

    let mut dest = try_alloc(size + 1)?;
    dest.extend_from_slice(&src[..size]);
    sanitize(&mut dest, size, U_SPECIAL);
    dest.push(0);
    Some(dest)
}

/// Converts space-padded 7-bit ASCII, as commonly found in fixed-width
/// hardware fields, to a terminated string.
///
/// Trailing spaces are dropped. The destination is well-formed whatever the
/// outcome: as much text as fits is copied and bytes with bit 7 set become
/// [`U_SPECIAL`].
///
/// # Errors
///
/// - [`SpasciiError::Overflow`] if the text was truncated.
/// - [`SpasciiError::NonAscii`] if bytes had to be replaced.
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn spascii_to_str(dest: &mut [u8], src: &[u8]) -> Result<(), SpasciiError> {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let text = &src[..str_size(src)];
    let len = text.iter().rposition(|&b| b != b' ').map_or(0, |last| last + 1);
    let out_len = len.min(dest.len() - 1);

    let mut result = Ok(());
    for (d, &b) in dest.iter_mut().zip(&text[..out_len]) {
        if b.is_ascii() {
            *d = b;
        } else {
            *d = U_SPECIAL;
            result = Err(SpasciiError::NonAscii);
        }
    }
    dest[out_len] = 0;

    if out_len < len {
        return Err(SpasciiError::Overflow);
    }
    result
}

/// Inserts `ch` into the wide string `s` at scalar index `pos`, shifting the
/// rest of the string right.
///
/// Returns `false` if `pos` is past the end of the string or the buffer has
/// no room for one more scalar.
pub fn wstr_linsert(s: &mut [u32], ch: u32, pos: usize) -> bool {
    let len = wstr_length(s);

    if pos > len || len + 1 > s.len() {
        return false;
    }

    if len + 1 < s.len() {
        s[len + 1] = 0;
    }
    s.copy_within(pos..len, pos + 1);
    s[pos] = ch;
    true
}

/// Removes the scalar at index `pos` from the wide string `s`, shifting the
/// rest of the string left.
///
/// Returns `false` if `pos` is not inside the string.
pub fn wstr_remove(s: &mut [u32], pos: usize) -> bool {
    let len = wstr_length(s);

    if pos >= len {
        return false;
    }

    s.copy_within(pos + 1..len, pos);
    s[len - 1] = 0;
    true
}
