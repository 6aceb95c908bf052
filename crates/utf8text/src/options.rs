/// Configuration for the [`StreamDecoder`](crate::StreamDecoder).
///
/// # Examples
///
/// ```rust
/// use utf8text::{DecoderOptions, StreamDecoder};
///
/// let mut decoder = StreamDecoder::new(DecoderOptions {
///     lossy: true,
///     ..Default::default()
/// });
/// let text: String = decoder.feed(b"a\xFFb").map(Result::unwrap).collect();
/// assert_eq!(text, "a\u{FFFD}b");
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderOptions {
    /// Whether to yield `U+FFFD REPLACEMENT CHARACTER` for malformed input
    /// instead of an error.
    ///
    /// A sequence left unfinished when the stream is closed is replaced the
    /// same way.
    ///
    /// # Default
    ///
    /// `false`
    pub lossy: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(default))]
    /// Panic on malformed input instead of reporting it.
    ///
    /// Enabled only in test and fuzzing builds to get a backtrace at the
    /// offending byte.
    pub panic_on_error: bool,
}
