//! A `mbrtoc32`-style entry point: decode one scalar per call with an
//! optional caller-supplied state.
//!
//! Callers that do not track a [`DecoderState`] themselves fall back to a
//! default state. That state is never process-global: it belongs either to a
//! [`DecodeContext`] the caller owns or, with the `std` feature, to the
//! calling thread.

use crate::{NO_LIMIT, decoder::DecoderState, decoder::decode_next, scalar::INVALID};

/// Outcome of [`mbrtoc32`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// A scalar other than `U+0000` was completed by the given number of
    /// bytes.
    Complete(usize),
    /// The zero scalar was decoded, or the input was empty.
    Null,
    /// All input was consumed into a sequence that is not finished yet. The
    /// state holds the partial value.
    Incomplete,
    /// The input is not well-formed. The state has been reset.
    Invalid,
}

/// Decodes at most one scalar from the start of `input`, writing it to
/// `out`.
///
/// Passing `None` as `input` resets `state` the way decoding a lone zero byte
/// does, without writing to `out`: a clean state yields
/// [`Conversion::Null`] and a pending state yields [`Conversion::Invalid`].
///
/// ```rust
/// use utf8text::{Conversion, DecoderState, mbrtoc32};
///
/// let mut state = DecoderState::new();
/// let mut ch = 0;
/// assert_eq!(mbrtoc32(Some(&mut ch), Some(b"\xC5"), &mut state), Conversion::Incomplete);
/// assert_eq!(mbrtoc32(Some(&mut ch), Some(b"\xBEx"), &mut state), Conversion::Complete(1));
/// assert_eq!(ch, 'ž' as u32);
/// ```
pub fn mbrtoc32(out: Option<&mut u32>, input: Option<&[u8]>, state: &mut DecoderState) -> Conversion {
    let (out, input) = match input {
        Some(input) => (out, input),
        None => (None, &b"\0"[..]),
    };

    let mut offset = 0;
    let ch = decode_next(input, &mut offset, NO_LIMIT, state);

    if ch == INVALID {
        debug_assert!(state.is_clean());
        return Conversion::Invalid;
    }

    if state.is_pending() {
        debug_assert_eq!(ch, 0);
        return Conversion::Incomplete;
    }

    if let Some(out) = out {
        *out = ch;
    }

    if ch == 0 {
        Conversion::Null
    } else {
        Conversion::Complete(offset)
    }
}

/// Owner of the default decoder state for callers that pass none.
///
/// Each context is independent, so concurrent users that each hold their own
/// context never observe one another's partial sequences.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    state: DecoderState,
}

impl DecodeContext {
    /// Creates a context with a clean default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default state held by this context.
    #[must_use]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// [`mbrtoc32`] using `state` if given, otherwise this context's default
    /// state.
    pub fn mbrtoc32(
        &mut self,
        out: Option<&mut u32>,
        input: Option<&[u8]>,
        state: Option<&mut DecoderState>,
    ) -> Conversion {
        mbrtoc32(out, input, state.unwrap_or(&mut self.state))
    }
}

#[cfg(feature = "std")]
std::thread_local! {
    static LOCAL_STATE: core::cell::Cell<DecoderState> = const {
        core::cell::Cell::new(DecoderState::new())
    };
}

/// [`mbrtoc32`] using `state` if given, otherwise a default state private to
/// the calling thread.
#[cfg(feature = "std")]
pub fn mbrtoc32_local(
    out: Option<&mut u32>,
    input: Option<&[u8]>,
    state: Option<&mut DecoderState>,
) -> Conversion {
    match state {
        Some(state) => mbrtoc32(out, input, state),
        None => LOCAL_STATE.with(|cell| {
            let mut state = cell.get();
            let result = mbrtoc32(out, input, &mut state);
            cell.set(state);
            result
        }),
    }
}
