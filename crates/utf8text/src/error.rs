use thiserror::Error;

/// Failure to write a scalar into a destination buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The destination has no room for the complete encoding. Nothing was
    /// written.
    #[error("destination buffer overflow")]
    Overflow,
    /// The value lies outside the code point space.
    #[error("invalid scalar value {0:#X}")]
    InvalidScalar(u32),
}

/// Failure reported by the streaming decoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A malformed sequence. `offset` counts bytes from the start of the
    /// stream and points at the first byte of the rejected sequence.
    #[error("invalid UTF-8 sequence at byte {offset}")]
    InvalidSequence {
        /// Stream offset of the first rejected byte.
        offset: usize,
    },
    /// The stream ended in the middle of a multi-byte sequence.
    #[error("incomplete UTF-8 sequence at end of input")]
    IncompleteSequence,
}

/// Outcome of a lossy space-padded ASCII conversion. The destination is
/// well-formed regardless.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpasciiError {
    /// The text did not fit and was truncated.
    #[error("text does not fit the destination buffer")]
    Overflow,
    /// The text contained bytes with bit 7 set; they were replaced.
    #[error("text contains non-ASCII bytes")]
    NonAscii,
}
