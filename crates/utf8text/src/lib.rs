//! A resumable UTF-8 codec and the codepoint-aware string routines built on
//! top of it.
//!
//! Strings are plain byte buffers. A string ends at its first zero byte or at
//! the end of the slice, whichever comes first, and destination capacities are
//! always the length of the destination slice. Three metrics apply to every
//! string:
//!
//! | Metric | Meaning                                              |
//! |--------|------------------------------------------------------|
//! | size   | number of bytes, excluding the terminator            |
//! | length | number of decoded scalar values                      |
//! | width  | number of display cells (one per scalar value)       |
//!
//! Wide strings (`&[u32]`, UTF-32) and UTF-16 strings (`&[u16]`) follow the
//! same termination rule.
//!
//! ```rust
//! use utf8text::{str_length, str_size, str_cpy};
//!
//! let s = "žluťoučký kůň".as_bytes();
//! assert_eq!(str_length(s), 13);
//! assert_eq!(str_size(s), 19);
//!
//! // Truncation never leaks half of a multi-byte sequence.
//! let mut dest = [0u8; 3];
//! str_cpy(&mut dest, s);
//! assert_eq!(&dest, b"\xc5\xbe\0");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod chunk_utils;
mod compare;
mod decoder;
mod encoder;
mod error;
mod metrics;
mod mutate;
mod options;
mod sanitize;
mod scalar;
mod search;
mod stream;
mod transcode;
mod uchar;

#[cfg(test)]
mod tests;

// Test and benchmark support.
#[doc(hidden)]
pub use chunk_utils::produce_chunks;
pub use compare::{str_casecmp, str_cmp, str_lcasecmp, str_lcmp, str_suffix, str_test_prefix};
pub use decoder::{DecoderState, decode, decode_next, decode_or, decode_reverse};
pub use encoder::{encode, encode_to_array};
pub use error::{DecodeError, EncodeError, SpasciiError};
pub use metrics::{
    str_length, str_lsize, str_nlength, str_nsize, str_size, str_width, utf16_wsize, wstr_length,
    wstr_lsize, wstr_nlength, wstr_nsize, wstr_size, wstr_width,
};
pub use mutate::{
    Tokens, spascii_to_str, str_append, str_cpy, str_dup, str_ltrim, str_ncpy, str_ndup,
    str_rtrim, str_tok, str_tokens, wstr_linsert, wstr_remove,
};
pub use options::DecoderOptions;
pub use sanitize::sanitize;
pub use scalar::{INVALID, NO_LIMIT, U_SPECIAL, ascii_check, chr_check, chr_width, str_bounds};
pub use search::{str_chr, str_rchr, str_str};
pub use stream::{ClosedDecoder, Decode, StreamDecoder};
pub use transcode::{
    str_to_autf16, str_to_awstr, str_to_utf16, str_to_wstr, utf16_to_str, wstr_to_astr,
    wstr_to_str,
};
#[cfg(feature = "std")]
pub use uchar::mbrtoc32_local;
pub use uchar::{Conversion, DecodeContext, mbrtoc32};
