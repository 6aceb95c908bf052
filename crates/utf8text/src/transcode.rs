//! Conversions between UTF-8 byte strings, wide (UTF-32) strings and UTF-16
//! strings.
//!
//! The bounded variants write into caller buffers and always leave them
//! terminated. The allocating variants size the result in a first pass and
//! allocate exactly that much before converting.

use alloc::vec::Vec;

use crate::{
    NO_LIMIT,
    decoder::Scalars,
    encoder::{encode, encode_to_array},
    error::EncodeError,
    metrics::{str_length, utf16_wsize, wstr_length},
    mutate::try_alloc,
    scalar::{INVALID, U_SPECIAL},
};

#[inline]
fn is_surrogate(ch: u32) -> bool {
    (0xD800..=0xDFFF).contains(&ch)
}

/// Scalars of `src` with malformed sequences replaced by [`U_SPECIAL`].
fn scalars_lossy(src: &[u8]) -> impl Iterator<Item = u32> + '_ {
    Scalars::new(src, NO_LIMIT).map(|(_, _, ch)| if ch == INVALID { u32::from(U_SPECIAL) } else { ch })
}

/// Encodes `ch` for output, refusing surrogate code points.
fn encode_scalar(ch: u32, dest: &mut [u8], cursor: &mut usize, limit: usize) -> Result<(), EncodeError> {
    if is_surrogate(ch) {
        return Err(EncodeError::InvalidScalar(ch));
    }
    encode(ch, dest, cursor, limit)
}

/// Converts the wide string `src` into `dest`, returning the size of the
/// result.
///
/// Conversion stops at the first scalar that cannot be encoded or does not
/// fit; `dest` is terminated either way.
///
/// # Errors
///
/// The [`EncodeError`] that stopped the conversion early.
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn wstr_to_str(dest: &mut [u8], src: &[u32]) -> Result<usize, EncodeError> {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let limit = dest.len() - 1;
    let mut cursor = 0;
    let mut result = Ok(());

    for &ch in &src[..wstr_length(src)] {
        if let Err(err) = encode_scalar(ch, dest, &mut cursor, limit) {
            log::trace!("wide string conversion stopped at byte {cursor}: {err}");
            result = Err(err);
            break;
        }
    }

    dest[cursor] = 0;
    result.map(|()| cursor)
}

/// Converts the wide string `src` into a newly allocated, terminated byte
/// string. Conversion stops at the first scalar that cannot be encoded.
///
/// Returns `None` if the allocation fails.
#[must_use]
pub fn wstr_to_astr(src: &[u32]) -> Option<Vec<u8>> {
    let scalars = || {
        src[..wstr_length(src)]
            .iter()
            .map_while(|&ch| if is_surrogate(ch) { None } else { encode_to_array(ch).ok() })
    };

    let size = scalars().map(|(_, len)| len).sum::<usize>();

    let mut dest = try_alloc(size + 1)?;
    for (utf8, len) in scalars() {
        dest.extend_from_slice(&utf8[..len]);
    }
    dest.push(0);
    Some(dest)
}

/// Decodes `src` into the wide string buffer `dest`, returning the number of
/// scalars written. At most `dest.len() - 1` scalars are written and the
/// result is always terminated. Malformed sequences become [`U_SPECIAL`].
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn str_to_wstr(dest: &mut [u32], src: &[u8]) -> usize {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let capacity = dest.len() - 1;
    let mut n = 0;
    for ch in scalars_lossy(src).take(capacity) {
        dest[n] = ch;
        n += 1;
    }
    dest[n] = 0;
    n
}

/// Decodes `src` into a newly allocated, terminated wide string.
///
/// Returns `None` if the allocation fails.
#[must_use]
pub fn str_to_awstr(src: &[u8]) -> Option<Vec<u32>> {
    let len = str_length(src);

    let mut dest = try_alloc(len + 1)?;
    dest.extend(scalars_lossy(src));
    dest.push(0);
    Some(dest)
}

/// Converts the UTF-16 string `src` into `dest`, returning the size of the
/// result.
///
/// A surrogate pair is combined into one scalar. A surrogate that is not
/// part of a pair ends the conversion as if the string ended there. `dest`
/// is terminated whatever the outcome.
///
/// # Errors
///
/// [`EncodeError::Overflow`] if the text did not fit.
///
/// # Panics
///
/// Panics if `dest` is empty.
pub fn utf16_to_str(dest: &mut [u8], src: &[u16]) -> Result<usize, EncodeError> {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let units = &src[..utf16_wsize(src)];
    let limit = dest.len() - 1;
    let mut cursor = 0;
    let mut idx = 0;
    let mut result = Ok(());

    while let Some(&unit) = units.get(idx) {
        let ch = match unit {
            0xD800..=0xDBFF => match units.get(idx + 1) {
                Some(&low @ 0xDC00..=0xDFFF) => {
                    idx += 2;
                    0x1_0000 + (u32::from(unit & 0x3FF) << 10) + u32::from(low & 0x3FF)
                }
                _ => break,
            },
            0xDC00..=0xDFFF => break,
            _ => {
                idx += 1;
                u32::from(unit)
            }
        };

        if let Err(err) = encode(ch, dest, &mut cursor, limit) {
            log::trace!("UTF-16 conversion stopped at unit {idx}: {err}");
            result = Err(err);
            break;
        }
    }

    dest[cursor] = 0;
    result.map(|()| cursor)
}

/// Converts `src` into the UTF-16 buffer `dest`, returning the number of
/// units written. Scalars from `U+10000` up become surrogate pairs and
/// malformed sequences become [`U_SPECIAL`].
///
/// # Errors
///
/// [`EncodeError::Overflow`] if the text did not fit. The units that did fit
/// are kept and terminated; a surrogate pair is never split.
///
/// # Panics
///
/// Panics if `dest` is empty.
#[allow(clippy::cast_possible_truncation)]
pub fn str_to_utf16(dest: &mut [u16], src: &[u8]) -> Result<usize, EncodeError> {
    assert!(!dest.is_empty(), "destination has no room for a terminator");

    let capacity = dest.len() - 1;
    let mut idx = 0;
    let mut result = Ok(());

    for ch in scalars_lossy(src) {
        let units = if ch >= 0x1_0000 { 2 } else { 1 };
        if idx + units > capacity {
            log::trace!("UTF-16 buffer of {} unit(s) overflowed", dest.len());
            result = Err(EncodeError::Overflow);
            break;
        }

        if units == 2 {
            let c = ch - 0x1_0000;
            dest[idx] = 0xD800 | (c >> 10) as u16;
            dest[idx + 1] = 0xDC00 | (c & 0x3FF) as u16;
        } else {
            dest[idx] = ch as u16;
        }
        idx += units;
    }

    dest[idx] = 0;
    result.map(|()| idx)
}

/// Converts `src` into a newly allocated, terminated UTF-16 string.
///
/// Returns `None` if the allocation fails.
#[must_use]
pub fn str_to_autf16(src: &[u8]) -> Option<Vec<u16>> {
    let units = scalars_lossy(src)
        .map(|ch| if ch >= 0x1_0000 { 2 } else { 1 })
        .sum::<usize>();

    let mut dest = try_alloc(units + 1)?;
    dest.resize(units + 1, 0);
    let written = str_to_utf16(&mut dest, src).ok()?;
    debug_assert_eq!(written, units);
    Some(dest)
}
