//! Resumable single-scalar UTF-8 decoding.
//!
//! [`decode_next`] is the engine everything else is built on. It decodes one
//! scalar per call and keeps the progress of an unfinished multi-byte
//! sequence in a caller-owned [`DecoderState`], so a stream split at any byte
//! boundary decodes to exactly the same scalars as the joined stream.
//!
//! Return values follow one convention throughout the crate:
//!
//! - a scalar value (the zero byte decodes to `0`),
//! - [`INVALID`] for a malformed sequence, with the state reset to clean,
//! - `0` with a clean state at the end of input,
//! - `0` with a pending state when the input stops mid-sequence.
//!
//! Well-formedness follows the strict profile: at most four bytes, no
//! non-shortest forms, no surrogates, nothing above U+10FFFF.

use crate::scalar::{
    INVALID, MASK_CONT, MASK_INITIAL2, MASK_INITIAL3, MASK_INITIAL4, is_2_byte, is_3_byte,
    is_4_byte, is_ascii, is_continuation,
};

/// Progress through a multi-byte sequence that has not been completed yet.
///
/// The value is packed into 16 bits: the payload bits collected so far,
/// preceded by just enough leading ones that the top bit clears when the
/// second-to-last continuation byte has been shifted in. The default value is
/// the clean state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderState(u16);

/// Pending state right after an `0xE0` leader.
const STATE_E0: u16 = 0b1111_1100_0000_0000;
/// Pending state right after an `0xED` leader.
const STATE_ED: u16 = 0b1111_1100_0000_1101;
/// Pending state right after an `0xF0` leader.
const STATE_F0: u16 = 0b1111_1111_1111_0000;
/// Pending state right after an `0xF4` leader.
const STATE_F4: u16 = 0b1111_1111_1111_0100;

impl DecoderState {
    /// A clean state with no pending sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Whether no sequence is in progress.
    #[must_use]
    pub const fn is_clean(self) -> bool {
        self.0 == 0
    }

    /// Whether a multi-byte sequence has been started but not finished.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        self.0 != 0
    }

    /// Abandons any pending sequence.
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Second byte of a 3- or 4-byte sequence that encodes a value that would
    /// fit in fewer bytes.
    fn is_non_shortest(self, b: u8) -> bool {
        (self.0 == STATE_E0 && b & 0b0010_0000 == 0) || (self.0 == STATE_F0 && b & 0b0011_0000 == 0)
    }

    /// Second byte of an `0xED` sequence landing in `U+D800..=U+DFFF`.
    fn is_surrogate(self, b: u8) -> bool {
        self.0 == STATE_ED && b >= 0xA0
    }

    /// Second byte of a 4-byte sequence landing above `U+10FFFF`.
    fn is_out_of_range(self, b: u8) -> bool {
        (self.0 > STATE_F4 && self.0 & 0xFFF8 == STATE_F0) || (self.0 == STATE_F4 && b >= 0x90)
    }

    /// Whether `b` cannot continue the pending sequence.
    fn rejects(self, b: u8) -> bool {
        !is_continuation(b)
            || self.is_non_shortest(b)
            || self.is_surrogate(b)
            || self.is_out_of_range(b)
    }
}

/// Decodes the scalar starting at `*cursor`, reading no further than `limit`
/// (clamped to `buf.len()`).
///
/// `cursor` only moves forward. A malformed sequence consumes at least one
/// byte, so callers can always resynchronize by calling again.
///
/// # Examples
///
/// ```rust
/// use utf8text::{DecoderState, decode_next};
///
/// let bytes = "é".as_bytes();
/// let mut state = DecoderState::new();
/// let mut cursor = 0;
///
/// // Only the leading byte is available: the sequence stays pending.
/// assert_eq!(decode_next(bytes, &mut cursor, 1, &mut state), 0);
/// assert!(state.is_pending());
///
/// assert_eq!(decode_next(bytes, &mut cursor, 2, &mut state), 0xE9);
/// assert!(state.is_clean());
/// ```
pub fn decode_next(buf: &[u8], cursor: &mut usize, limit: usize, state: &mut DecoderState) -> u32 {
    let size = limit.min(buf.len());
    debug_assert!(*cursor <= size, "cursor past the end of the buffer");

    if *cursor >= size {
        return 0;
    }

    if state.is_clean() {
        let b = buf[*cursor];
        *cursor += 1;

        if is_ascii(b) {
            return u32::from(b);
        }

        if is_continuation(b) {
            return INVALID;
        }

        if is_2_byte(b) {
            // 0xC0 and 0xC1 only ever start non-shortest forms.
            if b & 0b0001_1110 == 0 {
                return INVALID;
            }

            if *cursor < size && is_continuation(buf[*cursor]) {
                let ch = u32::from(b & MASK_INITIAL2) << 6 | u32::from(buf[*cursor] & MASK_CONT);
                *cursor += 1;
                return ch;
            }

            *state = DecoderState(u16::from(b) ^ 0b0000_0000_1100_0000);
        } else if is_3_byte(b) {
            let pending = DecoderState(u16::from(b) ^ 0b1111_1100_1110_0000);

            // A bad second byte rejects the leader alone, as the resumable
            // loop below does.
            if *cursor < size && pending.rejects(buf[*cursor]) {
                return INVALID;
            }

            if *cursor + 1 < size && is_continuation(buf[*cursor + 1]) {
                let ch = u32::from(b & MASK_INITIAL3) << 12
                    | u32::from(buf[*cursor] & MASK_CONT) << 6
                    | u32::from(buf[*cursor + 1] & MASK_CONT);
                *cursor += 2;
                return ch;
            }

            *state = pending;
        } else if is_4_byte(b) {
            let pending = DecoderState(u16::from(b) ^ 0b1111_1111_0000_0000);

            if *cursor < size && pending.rejects(buf[*cursor]) {
                return INVALID;
            }

            if *cursor + 2 < size
                && is_continuation(buf[*cursor + 1])
                && is_continuation(buf[*cursor + 2])
            {
                let ch = u32::from(b & MASK_INITIAL4) << 18
                    | u32::from(buf[*cursor] & MASK_CONT) << 12
                    | u32::from(buf[*cursor + 1] & MASK_CONT) << 6
                    | u32::from(buf[*cursor + 2] & MASK_CONT);
                *cursor += 3;
                return ch;
            }

            *state = pending;
        } else {
            return INVALID;
        }
    }

    while *cursor < size {
        let b = buf[*cursor];

        if state.rejects(b) {
            state.reset();
            return INVALID;
        }

        if state.0 & 0x8000 == 0 {
            let ch = u32::from(state.0) << 6 | u32::from(b & MASK_CONT);
            state.reset();
            *cursor += 1;
            return ch;
        }

        state.0 = state.0 << 6 | u16::from(b & MASK_CONT);
        *cursor += 1;
    }

    debug_assert!(state.is_pending());
    0
}

/// Decodes one scalar from a complete buffer.
///
/// Unlike [`decode_next`] there is no state to carry: a sequence cut off by
/// `limit` is reported as [`INVALID`] like any other malformed sequence.
pub fn decode(buf: &[u8], cursor: &mut usize, limit: usize) -> u32 {
    let mut state = DecoderState::new();
    let ch = decode_next(buf, cursor, limit, &mut state);

    if ch == INVALID || state.is_pending() {
        return INVALID;
    }
    ch
}

/// Like [`decode_next`], but reports malformed sequences as `replacement`.
pub fn decode_or(
    buf: &[u8],
    cursor: &mut usize,
    limit: usize,
    replacement: u32,
    state: &mut DecoderState,
) -> u32 {
    match decode_next(buf, cursor, limit, state) {
        INVALID => replacement,
        ch => ch,
    }
}

/// Decodes the scalar that ends right before `*cursor`, moving `cursor` back
/// to its first byte.
///
/// At most three continuation bytes are skipped (four bytes in total). The
/// leading byte found must announce exactly the number of continuation bytes
/// that follow it, otherwise the sequence is [`INVALID`]. Returns `0` when
/// `cursor` is already at the start of the buffer.
pub fn decode_reverse(buf: &[u8], cursor: &mut usize, limit: usize) -> u32 {
    if *cursor == 0 {
        return 0;
    }

    let mut cbytes = 0;
    while *cursor > 0 && cbytes < 4 {
        *cursor -= 1;
        let b = buf[*cursor];

        if is_continuation(b) {
            cbytes += 1;
            continue;
        }

        if crate::scalar::continuation_bytes(b) != Some(cbytes) {
            return INVALID;
        }

        let mut start = *cursor;
        return decode(buf, &mut start, limit);
    }

    INVALID
}

/// Forward scan over the scalars of a terminated string, yielding the byte
/// range and value of each one. Stops at the terminator or at `limit`.
#[derive(Debug, Clone)]
pub(crate) struct Scalars<'a> {
    buf: &'a [u8],
    cursor: usize,
    limit: usize,
}

impl<'a> Scalars<'a> {
    pub(crate) fn new(buf: &'a [u8], limit: usize) -> Self {
        Self {
            buf,
            cursor: 0,
            limit,
        }
    }

    /// Byte offset of the next undecoded scalar.
    pub(crate) fn offset(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Scalars<'_> {
    /// `(start, end, scalar)`
    type Item = (usize, usize, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor;
        match decode(self.buf, &mut self.cursor, self.limit) {
            0 => {
                self.cursor = start;
                None
            }
            ch => Some((start, self.cursor, ch)),
        }
    }
}
