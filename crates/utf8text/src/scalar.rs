//! Scalar constants and byte classification shared by the decoder, the
//! encoder and the sanitizer.

/// Sentinel returned by the decoder for a malformed sequence. It lies outside
/// the code point space, so it never collides with a decoded scalar.
pub const INVALID: u32 = u32::MAX;

/// Replacement used wherever a malformed sequence must still produce output
/// (bounded copies, conversions, lossy decoding).
pub const U_SPECIAL: u8 = b'?';

/// Size or length limit meaning "unbounded".
pub const NO_LIMIT: usize = usize::MAX;

/// Largest valid scalar value.
pub(crate) const SCALAR_MAX: u32 = 0x10_FFFF;

/// Number of data bits carried by a continuation byte.
pub(crate) const CONT_BITS: u32 = 6;

pub(crate) const MASK_INITIAL2: u8 = 0b0001_1111;
pub(crate) const MASK_INITIAL3: u8 = 0b0000_1111;
pub(crate) const MASK_INITIAL4: u8 = 0b0000_0111;
pub(crate) const MASK_CONT: u8 = 0b0011_1111;

/// Worst-case number of bytes needed to encode `length` scalars.
#[must_use]
pub const fn str_bounds(length: usize) -> usize {
    length * 4
}

#[inline]
pub(crate) fn is_ascii(b: u8) -> bool {
    b < 0x80
}

#[inline]
pub(crate) fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

#[inline]
pub(crate) fn is_2_byte(b: u8) -> bool {
    b & 0xE0 == 0xC0
}

#[inline]
pub(crate) fn is_3_byte(b: u8) -> bool {
    b & 0xF0 == 0xE0
}

#[inline]
pub(crate) fn is_4_byte(b: u8) -> bool {
    b & 0xF8 == 0xF0
}

/// Number of continuation bytes announced by a leading byte, or `None` for
/// continuation bytes and the never-valid `0xF8..=0xFF`.
#[inline]
pub(crate) fn continuation_bytes(b: u8) -> Option<usize> {
    if is_ascii(b) {
        Some(0)
    } else if is_2_byte(b) {
        Some(1)
    } else if is_3_byte(b) {
        Some(2)
    } else if is_4_byte(b) {
        Some(3)
    } else {
        None
    }
}

/// Number of continuation bytes needed to encode `ch`, chosen by the bit
/// width of the value (7, 11, 16 or 21 bits).
#[inline]
pub(crate) fn scalar_continuation_bytes(ch: u32) -> Option<usize> {
    if ch >> 7 == 0 {
        Some(0)
    } else if ch >> 11 == 0 {
        Some(1)
    } else if ch >> 16 == 0 {
        Some(2)
    } else if ch >> 21 == 0 {
        Some(3)
    } else {
        // Codes longer than 21 bits are not representable.
        None
    }
}

/// Whether `ch` is a plain 7-bit ASCII character.
#[must_use]
#[inline]
pub fn ascii_check(ch: u32) -> bool {
    ch <= 0x7F
}

/// Whether `ch` lies inside the code point space (`0..=0x10FFFF`).
#[must_use]
#[inline]
pub fn chr_check(ch: u32) -> bool {
    ch <= SCALAR_MAX
}

/// Display width of a single scalar on a character cell display.
///
/// Every scalar occupies exactly one cell. There is no East Asian width
/// table and combining marks are not special-cased.
#[must_use]
#[inline]
pub fn chr_width(_ch: u32) -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_classification() {
        assert_eq!(continuation_bytes(b'a'), Some(0));
        assert_eq!(continuation_bytes(0xC3), Some(1));
        assert_eq!(continuation_bytes(0xE2), Some(2));
        assert_eq!(continuation_bytes(0xF0), Some(3));
        assert_eq!(continuation_bytes(0x80), None);
        assert_eq!(continuation_bytes(0xF8), None);
        assert_eq!(continuation_bytes(0xFF), None);
    }

    #[test]
    fn width_thresholds() {
        assert_eq!(scalar_continuation_bytes(0x7F), Some(0));
        assert_eq!(scalar_continuation_bytes(0x80), Some(1));
        assert_eq!(scalar_continuation_bytes(0x7FF), Some(1));
        assert_eq!(scalar_continuation_bytes(0x800), Some(2));
        assert_eq!(scalar_continuation_bytes(0xFFFF), Some(2));
        assert_eq!(scalar_continuation_bytes(0x1_0000), Some(3));
        assert_eq!(scalar_continuation_bytes(0x1F_FFFF), Some(3));
        assert_eq!(scalar_continuation_bytes(0x20_0000), None);
    }

    #[test]
    fn checks() {
        assert!(ascii_check(0x7F));
        assert!(!ascii_check(0x80));
        assert!(chr_check(0x10_FFFF));
        assert!(!chr_check(0x11_0000));
        assert_eq!(chr_width(0x4E2D), 1);
    }

    #[quickcheck_macros::quickcheck]
    fn continuation_count_matches_core(ch: char) -> bool {
        scalar_continuation_bytes(u32::from(ch)) == Some(ch.len_utf8() - 1)
    }
}
