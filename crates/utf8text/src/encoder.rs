use crate::{
    error::EncodeError,
    scalar::{CONT_BITS, chr_check, scalar_continuation_bytes},
};

/// Writes the UTF-8 encoding of `ch` into `dest` at `*cursor`, writing no
/// further than `limit` (clamped to `dest.len()`).
///
/// Nothing is written unless the whole encoding fits, and `cursor` only
/// advances on success. Surrogate code points are encoded like any other
/// value; callers that must not produce them filter beforehand.
///
/// # Errors
///
/// - [`EncodeError::Overflow`] if the encoding does not fit before `limit`.
/// - [`EncodeError::InvalidScalar`] if `ch` is above `U+10FFFF`.
///
/// # Examples
///
/// ```rust
/// use utf8text::{EncodeError, encode};
///
/// let mut buf = [0u8; 4];
/// let mut cursor = 0;
/// encode(0x20AC, &mut buf, &mut cursor, 4).unwrap();
/// assert_eq!(&buf[..cursor], "€".as_bytes());
///
/// assert_eq!(encode(0x1F600, &mut buf, &mut cursor, 4), Err(EncodeError::Overflow));
/// assert_eq!(cursor, 3);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn encode(ch: u32, dest: &mut [u8], cursor: &mut usize, limit: usize) -> Result<(), EncodeError> {
    let size = limit.min(dest.len());

    if *cursor >= size {
        return Err(EncodeError::Overflow);
    }

    if ch < 0x80 {
        dest[*cursor] = ch as u8;
        *cursor += 1;
        return Ok(());
    }

    if !chr_check(ch) {
        return Err(EncodeError::InvalidScalar(ch));
    }

    let cbytes = scalar_continuation_bytes(ch).ok_or(EncodeError::InvalidScalar(ch))?;

    if *cursor + cbytes >= size {
        return Err(EncodeError::Overflow);
    }

    let mut rest = ch;
    for i in (1..=cbytes).rev() {
        dest[*cursor + i] = 0x80 | (rest & 0x3F) as u8;
        rest >>= CONT_BITS;
    }

    // Data bits left for the leading byte, and the marker of `cbytes + 1`
    // high ones followed by a zero.
    let lead_bits = 6 - cbytes;
    let marker = !(0xFFu8 >> (cbytes + 1));
    dest[*cursor] = marker | (rest & ((1 << lead_bits) - 1)) as u8;

    *cursor += cbytes + 1;
    Ok(())
}

/// Encodes `ch` into a fresh four-byte array, returning the array and the
/// number of bytes used.
///
/// # Errors
///
/// [`EncodeError::InvalidScalar`] if `ch` is above `U+10FFFF`.
pub fn encode_to_array(ch: u32) -> Result<([u8; 4], usize), EncodeError> {
    let mut buf = [0u8; 4];
    let mut len = 0;
    encode(ch, &mut buf, &mut len, 4)?;
    Ok((buf, len))
}
