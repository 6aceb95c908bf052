#![expect(missing_docs)]

use rstest::*;
use utf8text::{
    Conversion, DecodeContext, DecodeError, DecoderOptions, StreamDecoder, produce_chunks,
    str_to_autf16, str_to_awstr, utf16_to_str, wstr_to_astr,
};

const TEXT: &str = "Příliš žluťoučký kůň úpěl ďábelské ódy 🐎🎻 — 终";

fn decode_all(chunks: &[&[u8]], options: DecoderOptions) -> Vec<Result<char, DecodeError>> {
    let mut decoder = StreamDecoder::new(options);
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(chunk));
    }
    out.extend(decoder.finish());
    out
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(64)]
#[case(TEXT.len())]
fn any_partition_decodes_identically(#[case] parts: usize) {
    let chunks = produce_chunks(TEXT.as_bytes(), parts);
    let decoded: String = decode_all(&chunks, DecoderOptions::default())
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("well-formed input");
    assert_eq!(decoded, TEXT);
}

#[rstest]
#[case(&[&b"ok\xFF"[..]], vec![Ok('o'), Ok('k'), Err(DecodeError::InvalidSequence { offset: 2 })])]
#[case(&[&b"\xE2\x82"[..], &b"\xAC"[..]], vec![Ok('€')])]
#[case(&[&b"\xE2"[..], &b"\x82"[..]], vec![Err(DecodeError::IncompleteSequence)])]
#[case(&[&b"\xED"[..], &b"\xA0\x80"[..]], vec![
    Err(DecodeError::InvalidSequence { offset: 0 }),
    Err(DecodeError::InvalidSequence { offset: 1 }),
    Err(DecodeError::InvalidSequence { offset: 2 }),
])]
#[case(&[&b"\xC2"[..], &b""[..], &b"\xA9"[..]], vec![Ok('©')])]
fn chunked_errors(#[case] chunks: &[&[u8]], #[case] expected: Vec<Result<char, DecodeError>>) {
    assert_eq!(decode_all(chunks, DecoderOptions::default()), expected);
}

#[rstest]
fn lossy_stream_never_fails() {
    let options = DecoderOptions {
        lossy: true,
        ..Default::default()
    };
    let chunks: [&[u8]; 3] = [b"a\xF0\x9F", b"\x98\x80\xC0", b"\xAF\xE2\x82"];
    let decoded: String = decode_all(&chunks, options)
        .into_iter()
        .map(|ch| ch.expect("lossy decoding never fails"))
        .collect();
    assert_eq!(decoded, "a😀\u{FFFD}\u{FFFD}\u{FFFD}");
}

#[rstest]
#[case(&b"\xED\xA0\x80z"[..], 1)]
#[case(&b"\xE0\x80\xAFz"[..], 1)]
#[case(&b"\xE0\x80\xAFz"[..], 2)]
#[case(&b"\xF4\x90\x80\x80z"[..], 2)]
#[case(&b"\xF5\x80\x80\x80z"[..], 3)]
fn lossy_output_ignores_split_point(#[case] bytes: &[u8], #[case] at: usize) {
    let options = DecoderOptions {
        lossy: true,
        ..Default::default()
    };
    let (head, tail) = bytes.split_at(at);
    let joined: String = decode_all(&[bytes], options).into_iter().map(Result::unwrap).collect();
    let split: String = decode_all(&[head, tail], options).into_iter().map(Result::unwrap).collect();

    assert_eq!(joined, split);
    assert_eq!(joined.chars().filter(|&ch| ch == '\u{FFFD}').count(), bytes.len() - 1);
}

#[rstest]
fn error_display() {
    assert_eq!(
        DecodeError::InvalidSequence { offset: 9 }.to_string(),
        "invalid UTF-8 sequence at byte 9"
    );
    assert_eq!(
        DecodeError::IncompleteSequence.to_string(),
        "incomplete UTF-8 sequence at end of input"
    );
}

#[rstest]
fn context_resumes_across_calls() {
    let mut context = DecodeContext::new();
    let bytes = "🎻".as_bytes();

    let mut ch = 0;
    for (i, byte) in bytes.iter().enumerate() {
        let result = context.mbrtoc32(Some(&mut ch), Some(core::slice::from_ref(byte)), None);
        if i + 1 < bytes.len() {
            assert_eq!(result, Conversion::Incomplete);
        } else {
            assert_eq!(result, Conversion::Complete(1));
        }
    }
    assert_eq!(ch, 0x1F3BB);
    assert!(context.state().is_clean());
}

#[rstest]
fn transcoding_round_trips() {
    let wide = str_to_awstr(TEXT.as_bytes()).expect("allocation");
    assert_eq!(wide.len(), TEXT.chars().count() + 1);
    let back = wstr_to_astr(&wide).expect("allocation");
    assert_eq!(&back[..TEXT.len()], TEXT.as_bytes());
    assert_eq!(back.last(), Some(&0));

    let units = str_to_autf16(TEXT.as_bytes()).expect("allocation");
    let expected: Vec<u16> = TEXT.encode_utf16().chain([0]).collect();
    assert_eq!(units, expected);

    let mut bytes = vec![0u8; TEXT.len() + 1];
    assert_eq!(utf16_to_str(&mut bytes, &units), Ok(TEXT.len()));
    assert_eq!(&bytes[..TEXT.len()], TEXT.as_bytes());
}
