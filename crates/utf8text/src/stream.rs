//! Incremental decoding of a byte stream that arrives in arbitrary chunks.
//!
//! ```rust
//! use utf8text::{DecoderOptions, StreamDecoder};
//!
//! let mut decoder = StreamDecoder::new(DecoderOptions::default());
//! let mut text = String::new();
//! for chunk in [&b"\xF0\x9F"[..], b"\x98", b"\x80!"] {
//!     for ch in decoder.feed(chunk) {
//!         text.push(ch.unwrap());
//!     }
//! }
//! assert_eq!(decoder.finish().count(), 0);
//! assert_eq!(text, "😀!");
//! ```

use alloc::vec::Vec;

use crate::{
    NO_LIMIT,
    decoder::{DecoderState, decode_next},
    error::DecodeError,
    options::DecoderOptions,
    scalar::INVALID,
};

/// A UTF-8 decoder fed one chunk at a time.
///
/// The scalars produced do not depend on where the chunk boundaries fall: a
/// multi-byte sequence split across chunks is carried over in a
/// [`DecoderState`] and completed by the next chunk.
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    options: DecoderOptions,
    state: DecoderState,
    /// Stream offset of the next byte to decode.
    offset: usize,
    /// Stream offset of the first byte of the sequence being decoded.
    seq_start: usize,
    /// Input left over by a [`Decode`] dropped before it was exhausted.
    backlog: Vec<u8>,
}

impl StreamDecoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Number of bytes consumed from the stream so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether a multi-byte sequence has been started but not finished.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Feeds a chunk of input and iterates over the scalars it completes.
    ///
    /// Input the iterator has not reached when it is dropped is kept and
    /// decoded ahead of the next chunk.
    pub fn feed<'a>(&'a mut self, chunk: &'a [u8]) -> Decode<'a> {
        let input = if self.backlog.is_empty() {
            Input::Borrowed(chunk)
        } else {
            let mut buffered = core::mem::take(&mut self.backlog);
            buffered.extend_from_slice(chunk);
            Input::Owned(buffered)
        };

        Decode {
            decoder: self,
            input,
            cursor: 0,
        }
    }

    /// Closes the stream and iterates over whatever is left.
    ///
    /// A sequence still pending at this point is reported once as
    /// [`DecodeError::IncompleteSequence`].
    #[must_use]
    pub fn finish(mut self) -> ClosedDecoder {
        let rest = core::mem::take(&mut self.backlog);
        ClosedDecoder {
            decoder: self,
            rest,
            cursor: 0,
            closed: false,
        }
    }

    fn step(&mut self, buf: &[u8], cursor: &mut usize) -> Option<Result<char, DecodeError>> {
        if *cursor >= buf.len() {
            return None;
        }

        if self.state.is_clean() {
            self.seq_start = self.offset;
        }

        let before = *cursor;
        let ch = decode_next(buf, cursor, NO_LIMIT, &mut self.state);
        self.offset += *cursor - before;

        match ch {
            // The chunk ended inside a sequence; the zero byte decodes as
            // `0` with a clean state.
            0 if self.state.is_pending() => None,
            INVALID => Some(self.reject(DecodeError::InvalidSequence {
                offset: self.seq_start,
            })),
            ch => Some(char::from_u32(ch).map_or_else(
                || {
                    self.reject(DecodeError::InvalidSequence {
                        offset: self.seq_start,
                    })
                },
                Ok,
            )),
        }
    }

    fn reject(&self, err: DecodeError) -> Result<char, DecodeError> {
        log::trace!("{err}");

        #[cfg(any(test, feature = "fuzzing"))]
        if self.options.panic_on_error {
            panic!("{err}");
        }

        if self.options.lossy {
            Ok(char::REPLACEMENT_CHARACTER)
        } else {
            Err(err)
        }
    }
}

#[derive(Debug)]
enum Input<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl Input<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Input::Borrowed(bytes) => *bytes,
            Input::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Iterator over the scalars completed by one chunk.
///
/// Returned by [`StreamDecoder::feed`].
#[derive(Debug)]
pub struct Decode<'a> {
    decoder: &'a mut StreamDecoder,
    input: Input<'a>,
    cursor: usize,
}

impl Iterator for Decode<'_> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.step(self.input.as_slice(), &mut self.cursor)
    }
}

impl Drop for Decode<'_> {
    fn drop(&mut self) {
        let rest = &self.input.as_slice()[self.cursor..];
        if !rest.is_empty() {
            self.decoder.backlog.extend_from_slice(rest);
        }
    }
}

/// A [`StreamDecoder`] closed to further input.
///
/// Returned by [`StreamDecoder::finish`]. Yields the scalars of any input
/// not yet decoded, then reports a sequence left unfinished.
#[derive(Debug)]
pub struct ClosedDecoder {
    decoder: StreamDecoder,
    rest: Vec<u8>,
    cursor: usize,
    closed: bool,
}

impl Iterator for ClosedDecoder {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.decoder.step(&self.rest, &mut self.cursor) {
            return Some(item);
        }

        if self.closed {
            return None;
        }
        self.closed = true;

        if self.decoder.state.is_pending() {
            self.decoder.state.reset();
            return Some(self.decoder.reject(DecodeError::IncompleteSequence));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;

    fn decode_chunks(chunks: &[&[u8]], options: DecoderOptions) -> Vec<Result<char, DecodeError>> {
        let mut decoder = StreamDecoder::new(options);
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(decoder.feed(chunk));
        }
        out.extend(decoder.finish());
        out
    }

    #[test]
    fn sequence_split_across_chunks() {
        let out = decode_chunks(&[b"a\xE2", b"\x82", b"\xACb"], DecoderOptions::default());
        assert_eq!(out, [Ok('a'), Ok('€'), Ok('b')]);
    }

    #[test]
    fn invalid_sequence_reports_stream_offset() {
        let out = decode_chunks(&[b"ab\xE2", b"\x82x"], DecoderOptions::default());
        assert_eq!(
            out,
            [
                Ok('a'),
                Ok('b'),
                Err(DecodeError::InvalidSequence { offset: 2 }),
                Ok('x')
            ]
        );
    }

    #[test]
    fn unfinished_sequence_reported_once_on_finish() {
        let mut decoder = StreamDecoder::default();
        assert_eq!(decoder.feed(b"\xF0\x9F").count(), 0);
        assert!(decoder.is_pending());
        assert_eq!(decoder.offset(), 2);

        let rest: Vec<_> = decoder.finish().collect();
        assert_eq!(rest, [Err(DecodeError::IncompleteSequence)]);
    }

    #[test]
    fn lossy_replaces_errors() {
        let options = DecoderOptions {
            lossy: true,
            ..Default::default()
        };
        let text: String = decode_chunks(&[b"\xC0\x80a", b"\xE2\x82"], options)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(text, "\u{FFFD}\u{FFFD}a\u{FFFD}");
    }

    #[test]
    fn zero_byte_is_a_scalar() {
        let out = decode_chunks(&[b"a\0b"], DecoderOptions::default());
        assert_eq!(out, [Ok('a'), Ok('\0'), Ok('b')]);
    }

    #[test]
    fn dropped_iterator_keeps_unread_input() {
        let mut decoder = StreamDecoder::default();
        let first = decoder.feed("ab€".as_bytes()).next();
        assert_eq!(first, Some(Ok('a')));

        let out: Vec<_> = decoder.feed(b"c").collect();
        assert_eq!(out, [Ok('b'), Ok('€'), Ok('c')]);
    }

    #[test]
    fn dropped_iterator_input_is_decoded_on_finish() {
        let mut decoder = StreamDecoder::default();
        drop(decoder.feed(b"xy\xE2"));
        let out: Vec<_> = decoder.finish().collect();
        assert_eq!(out, [Ok('x'), Ok('y'), Err(DecodeError::IncompleteSequence)]);
    }

    #[test]
    #[should_panic(expected = "invalid UTF-8 sequence at byte 1")]
    fn panic_on_error() {
        let mut decoder = StreamDecoder::new(DecoderOptions {
            panic_on_error: true,
            ..Default::default()
        });
        let _ = decoder.feed(b"a\xFF").count();
    }
}
