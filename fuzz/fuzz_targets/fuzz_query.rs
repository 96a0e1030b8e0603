#![no_main]

use bitquery::QueryIter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut it = QueryIter::new(data);
    let mut last = 0;
    let mut fields = 0usize;
    let mut rebuilt = Vec::with_capacity(data.len());
    while it.advance() {
        assert!(it.position() >= last, "position went backwards");
        assert!(it.position() <= data.len());
        last = it.position();

        if fields > 0 {
            rebuilt.push(b'&');
        }
        fields += 1;
        rebuilt.extend_from_slice(it.key());
        if it.has_value() {
            rebuilt.push(b'=');
            rebuilt.extend_from_slice(it.value());
        } else {
            assert!(it.value().is_empty());
        }
    }
    assert!(it.is_exhausted());
    assert_eq!(rebuilt, data);

    let separators = data.iter().filter(|&&b| b == b'&').count();
    let expected = if data.is_empty() { 0 } else { separators + 1 };
    assert_eq!(fields, expected);
});
