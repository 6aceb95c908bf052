//! In-place repair of byte strings into well-formed UTF-8.

use crate::scalar::{continuation_bytes, is_continuation};

/// Replaces, in place, every byte that is not part of a complete well-formed
/// sequence with `replacement`, returning the number of bytes replaced.
///
/// Scanning stops at the first zero byte or after `max_bytes` bytes. C0
/// control bytes are always replaced, and so is the 2-byte C1 control range
/// (`U+0080..=U+009F`).
///
/// Repair is byte-granular: for a malformed multi-byte sequence only its
/// leading byte is replaced. The bytes after it are examined again on their
/// own, so stray continuation bytes are replaced one by one while a
/// well-formed sequence that follows survives intact. The buffer length
/// never changes.
///
/// # Examples
///
/// ```rust
/// use utf8text::sanitize;
///
/// let mut buf = *b"a\xE2\x82b\tc";
/// assert_eq!(sanitize(&mut buf, 6, b'?'), 3);
/// assert_eq!(&buf, b"a??b?c");
/// ```
pub fn sanitize(buf: &mut [u8], max_bytes: usize, replacement: u8) -> usize {
    let end = max_bytes.min(buf.len());
    let mut count = 0;
    let mut i = 0;

    while i < end && buf[i] != 0 {
        let b0 = buf[i];
        let remaining = end - i;

        if b0 < b' ' {
            buf[i] = replacement;
            count += 1;
            i += 1;
            continue;
        }

        let cont = match continuation_bytes(b0) {
            Some(0) => {
                i += 1;
                continue;
            }
            Some(cont) if cont < remaining => cont,
            _ => {
                buf[i] = replacement;
                count += 1;
                i += 1;
                continue;
            }
        };

        let seq = &buf[i..=i + cont];
        if !seq[1..].iter().all(|&b| is_continuation(b)) || is_rejected(seq) {
            buf[i] = replacement;
            count += 1;
            i += 1;
            continue;
        }

        i += cont + 1;
    }

    if count > 0 {
        log::trace!("sanitize replaced {count} byte(s) in {end} byte(s)");
    }

    count
}

/// Structurally complete sequences that still do not encode an acceptable
/// scalar.
fn is_rejected(seq: &[u8]) -> bool {
    match *seq {
        // Non-shortest 2-byte form (0xC0, 0xC1) and the C1 controls.
        [b0, b1] => b0 & 0b0001_1110 == 0 || (b0 == 0xC2 && b1 < 0xA0),
        // Non-shortest 3-byte form and surrogates.
        [b0, b1, _] => (b0 == 0xE0 && b1 < 0xA0) || (b0 == 0xED && b1 >= 0xA0),
        // Non-shortest 4-byte form and values above U+10FFFF.
        [b0, b1, _, _] => (b0 == 0xF0 && b1 < 0x90) || b0 > 0xF4 || (b0 == 0xF4 && b1 >= 0x90),
        _ => false,
    }
}
