#![no_main]

use arbitrary::Arbitrary;
use bitquery::{Base2Error, DecodeOptions, DigitPolicy, TrailingBits, base2};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    lenient: bool,
    truncate: bool,
    garbage: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Round trip through the strict decoder.
    let mut digits = vec![0u8; base2::encode_len(input.bytes.len())];
    let n = base2::encode(&mut digits, &input.bytes).unwrap();
    assert_eq!(n, 8 * input.bytes.len());
    assert_eq!(digits[n], 0);
    digits.truncate(n);

    let mut out = vec![0u8; base2::decode_len(n)];
    let m = base2::decode(&mut out, &digits).unwrap();
    assert_eq!(out[..m], input.bytes[..]);

    let mut in_place = digits.clone();
    let k = base2::decode_in_place(&mut in_place).unwrap();
    assert_eq!(in_place[..k], input.bytes[..]);

    // Arbitrary input must never panic, and must honour the options.
    let options = DecodeOptions {
        digits: if input.lenient { DigitPolicy::Lenient } else { DigitPolicy::Strict },
        trailing: if input.truncate { TrailingBits::Truncate } else { TrailingBits::Reject },
    };
    let mut out = vec![0u8; base2::decode_len(input.garbage.len())];
    match base2::decode_with(&mut out, &input.garbage, options) {
        Ok(len) => assert_eq!(len, input.garbage.len() / 8),
        Err(Base2Error::TrailingBits { len }) => {
            assert!(!input.truncate);
            assert_ne!(len % 8, 0);
        }
        Err(Base2Error::InvalidDigit { offset, byte }) => {
            assert!(!input.lenient);
            assert_eq!(input.garbage[offset], byte);
        }
        Err(err @ Base2Error::BufferTooSmall { .. }) => panic!("sized by decode_len: {err}"),
    }
});
