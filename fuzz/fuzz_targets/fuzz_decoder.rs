#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8text::{
    Conversion, DecoderOptions, DecoderState, INVALID, NO_LIMIT, StreamDecoder, decode, mbrtoc32,
};

#[derive(Debug, Arbitrary)]
struct Input {
    lossy: bool,
    split_seed: u64,
    data: Vec<u8>,
}

/// Split `data` into chunks of at least one byte using a deterministic seed.
/// Chunks may end in the middle of a sequence.
fn split_into_chunks(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut seed = split_seed;

    while !rest.is_empty() {
        let size = (seed as usize % rest.len()) + 1;
        let (chunk, tail) = rest.split_at(size);
        chunks.push(chunk);
        rest = tail;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9_7F4A_7C15;
    }

    chunks
}

fn decoder(input: Input) {
    // The zero byte terminates strings for the one-shot decoder.
    let data: Vec<u8> = input.data.into_iter().filter(|&b| b != 0).collect();

    let mut one_shot = Vec::new();
    let mut cursor = 0;
    loop {
        match decode(&data, &mut cursor, NO_LIMIT) {
            0 => break,
            ch => one_shot.push(ch),
        }
    }
    assert_eq!(cursor, data.len());

    let well_formed = std::str::from_utf8(&data);
    assert_eq!(well_formed.is_ok(), !one_shot.contains(&INVALID));

    let mut stream = StreamDecoder::new(DecoderOptions {
        lossy: input.lossy,
        panic_on_error: false,
    });
    let mut streamed = Vec::new();
    for chunk in split_into_chunks(&data, input.split_seed) {
        streamed.extend(stream.feed(chunk));
    }
    assert_eq!(stream.offset(), data.len());
    streamed.extend(stream.finish());

    let mut state = DecoderState::new();
    let mut byte_wise = Vec::new();
    for byte in &data {
        let mut ch = 0;
        match mbrtoc32(Some(&mut ch), Some(std::slice::from_ref(byte)), &mut state) {
            Conversion::Complete(_) => byte_wise.push(ch),
            Conversion::Incomplete => {}
            Conversion::Null | Conversion::Invalid => break,
        }
    }

    if let Ok(text) = well_formed {
        let chars: Vec<char> = text.chars().collect();
        let streamed: Vec<char> = streamed.into_iter().map(Result::unwrap).collect();
        assert_eq!(streamed, chars);
        assert!(text.chars().map(u32::from).eq(byte_wise));
        assert!(state.is_clean());
    } else if input.lossy {
        assert!(streamed.iter().all(Result::is_ok));
    } else {
        assert!(streamed.iter().any(Result::is_err));
    }
}

fuzz_target!(|input: Input| decoder(input));
