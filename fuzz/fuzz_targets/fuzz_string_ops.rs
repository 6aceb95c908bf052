#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8text::{
    NO_LIMIT, U_SPECIAL, sanitize, str_append, str_cpy, str_length, str_lsize, str_size,
    str_to_autf16, str_to_awstr, str_tokens, utf16_to_str, wstr_to_astr,
};

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    data: Vec<u8>,
    tail: Vec<u8>,
    delim: Vec<u8>,
}

fn well_formed(bytes: &[u8]) -> bool {
    std::str::from_utf8(&bytes[..str_size(bytes)]).is_ok()
}

fn string_ops(input: Input) {
    let capacity = usize::from(input.capacity).max(1);

    let mut dest = vec![0xAA; capacity];
    let n = str_cpy(&mut dest, &input.data);
    assert!(n < capacity && dest[n] == 0 && well_formed(&dest));

    let m = str_append(&mut dest, &input.tail);
    assert!(m >= n && m < capacity && dest[m] == 0 && well_formed(&dest));

    let mut repaired = input.data.clone();
    sanitize(&mut repaired, NO_LIMIT, U_SPECIAL);
    assert!(well_formed(&repaired));
    assert_eq!(sanitize(&mut repaired, NO_LIMIT, U_SPECIAL), 0);

    let length = str_length(&repaired);
    assert_eq!(str_lsize(&repaired, length), str_size(&repaired));

    let wide = str_to_awstr(&repaired).expect("allocation");
    let narrow = wstr_to_astr(&wide).expect("allocation");
    assert_eq!(&narrow[..str_size(&narrow)], &repaired[..str_size(&repaired)]);

    let units = str_to_autf16(&repaired).expect("allocation");
    let mut back = vec![0u8; str_size(&repaired) + 1];
    assert_eq!(utf16_to_str(&mut back, &units), Ok(str_size(&repaired)));

    let mut tokenized = repaired.clone();
    for token in str_tokens(&mut tokenized, &input.delim) {
        assert!(!token.is_empty());
        assert!(std::str::from_utf8(token).is_ok());
    }
}

fuzz_target!(|input: Input| string_ops(input));
