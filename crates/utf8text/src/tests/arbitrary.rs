use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

/// Leading bytes that sit on the edges of the acceptable ranges.
const EDGE_LEADERS: [u8; 12] = [
    0xC0, 0xC1, 0xC2, 0xDF, 0xE0, 0xE1, 0xED, 0xEF, 0xF0, 0xF4, 0xF5, 0xFF,
];

/// Bytes that are mostly UTF-8 shaped: whole encoded scalars mixed with stray
/// continuation bytes, edge-case leaders and raw noise. Never contains a zero
/// byte, so the whole buffer is one string.
#[derive(Debug, Clone)]
pub(crate) struct Utf8Soup(pub(crate) Vec<u8>);

impl Arbitrary for Utf8Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 48;
        let mut bytes = Vec::with_capacity(len * 2);

        for _ in 0..len {
            match u8::arbitrary(g) % 4 {
                0 => bytes.push(u8::arbitrary(g)),
                1 => bytes.push(0x80 | (u8::arbitrary(g) & 0x3F)),
                2 => bytes.push(*g.choose(&EDGE_LEADERS).unwrap()),
                _ => {
                    let ch = Scalar::arbitrary(g).0;
                    bytes.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
                }
            }
        }

        bytes.retain(|&b| b != 0);
        Self(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .map(|bytes| Self(bytes.into_iter().filter(|&b| b != 0).collect())),
        )
    }
}

/// A Unicode scalar value other than `U+0000`, drawn evenly from the encoded
/// lengths so that 3- and 4-byte forms are as common as ASCII.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scalar(pub(crate) char);

impl Arbitrary for Scalar {
    fn arbitrary(g: &mut Gen) -> Self {
        let (lo, hi) = *g
            .choose(&[(0x1, 0x7F), (0x80, 0x7FF), (0x800, 0xFFFF), (0x1_0000, 0x10_FFFF)])
            .unwrap();

        loop {
            let value = lo + u32::arbitrary(g) % (hi - lo + 1);
            if let Some(ch) = char::from_u32(value) {
                return Self(ch);
            }
        }
    }
}

/// Text free of zero bytes.
#[derive(Debug, Clone)]
pub(crate) struct Text(pub(crate) alloc::string::String);

impl Arbitrary for Text {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 32;
        Self((0..len).map(|_| Scalar::arbitrary(g).0).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .map(|s| Self(s.chars().filter(|&c| c != '\0').collect())),
        )
    }
}
