#![expect(missing_docs)]

use core::fmt::Write;

use bitquery::{Pair, QueryIter};

fn render(input: &[u8]) -> String {
    let mut out = String::new();
    let mut it = QueryIter::new(input);
    while it.advance() {
        writeln!(
            out,
            "key={:?}@{:?} value={:?} pos={}",
            bstr::BStr::new(it.key()),
            it.key_span().range(),
            it.pair().value.map(bstr::BStr::new),
            it.position(),
        )
        .unwrap();
    }
    out
}

#[test]
fn snapshot_typical_query() {
    insta::assert_snapshot!(render(b"foo=bar&ding=baz"), @r#"
    key="foo"@0..3 value=Some("bar") pos=8
    key="ding"@8..12 value=Some("baz") pos=16
    "#);
}

#[test]
fn snapshot_degenerate_fields() {
    insta::assert_snapshot!(render(b"a&b=&=c&"), @r#"
    key="a"@0..1 value=None pos=2
    key="b"@2..3 value=Some("") pos=5
    key=""@5..5 value=Some("c") pos=8
    key=""@8..8 value=None pos=8
    "#);
}

#[test]
fn snapshot_escapes_are_left_alone() {
    insta::assert_snapshot!(render(b"q=rust%20lang&lang=en+US&%3D=x"), @r#"
    key="q"@0..1 value=Some("rust%20lang") pos=14
    key="lang"@14..18 value=Some("en+US") pos=25
    key="%3D"@25..28 value=Some("x") pos=30
    "#);
}

#[test]
fn iterator_collects_pairs() {
    let pairs: Vec<Pair<'_>> = QueryIter::new(b"x=1&y&z=").collect();
    let keys: Vec<&[u8]> = pairs.iter().map(|p| p.key).collect();
    assert_eq!(keys, [&b"x"[..], b"y", b"z"]);
    assert_eq!(pairs[1].value, None);
    assert_eq!(pairs[2].value, Some(&b""[..]));
}

#[test]
fn cursor_outlives_nothing_but_its_buffer() {
    let owned = String::from("session=abc123&debug");
    let value = {
        let mut it = QueryIter::new(owned.as_bytes());
        it.find_key("session").and_then(|p| p.value)
    };
    // the slice outlives the cursor that produced it
    assert_eq!(value, Some(&b"abc123"[..]));
}
