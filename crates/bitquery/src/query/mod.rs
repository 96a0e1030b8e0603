//! Query string tokenizer.
//!
//! What it does
//! - Walks a `key=value&key=value` byte string one field at a time and exposes
//!   the current key and value as [`Span`]s into the caller's buffer.
//! - Performs no percent-decoding and no charset validation: keys and values
//!   are raw substrings of the input.
//!
//! Field rules
//! - A key runs from the field start to the first `=` or `&`.
//! - If the key stopped at `=`, the value runs to the next `&` (or the end).
//!   Otherwise the pair has no value.
//! - Fields are `&`-delimited, not terminated: `"a&"` is two fields, `""` is
//!   none.
//!
//! Invariants
//! - `position` never decreases between resets and never exceeds `len()`.
//! - Every span lies inside the source; an empty span may sit at `len()`.
//! - Nothing is allocated and the source is never written.

use core::{fmt, iter::FusedIterator, ops::Range};

use bstr::{BStr, ByteSlice};


/// An offset + length view into a source buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Number of bytes.
    pub len: usize,
}

impl Span {
    /// A span of `len` bytes starting at `start`.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// A zero-length span at `at`.
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, len: 0 }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The span as a `start..end` range.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end()
    }

    /// Borrow the bytes this span covers.
    ///
    /// # Panics
    ///
    /// Panics if the span does not lie within `source`.
    #[must_use]
    pub fn slice(self, source: &[u8]) -> &[u8] {
        &source[self.range()]
    }
}

/// One key/value pair produced by [`QueryIter`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    /// Raw key bytes, possibly empty.
    pub key: &'a [u8],
    /// `None` when the field contained no `=`.
    pub value: Option<&'a [u8]>,
}

impl<'a> Pair<'a> {
    /// The value, or an empty slice when the field had none.
    #[must_use]
    pub fn value_or_empty(&self) -> &'a [u8] {
        self.value.unwrap_or_default()
    }
}

impl fmt::Debug for Pair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("key", &BStr::new(self.key))
            .field("value", &self.value.map(BStr::new))
            .finish()
    }
}

/// Cursor over the key/value pairs of a query string.
///
/// The cursor borrows its input for `'a`, so every slice it hands out stays
/// valid for as long as the buffer does. It is not `Clone`:
/// starting a second scan means building a new cursor or calling
/// [`reset`](Self::reset).
///
/// ```rust
/// use bitquery::QueryIter;
///
/// let mut it = QueryIter::new(b"foo=bar&flag");
/// assert!(it.advance());
/// assert_eq!((it.key(), it.value()), (&b"foo"[..], &b"bar"[..]));
/// assert!(it.advance());
/// assert_eq!(it.key(), b"flag");
/// assert!(!it.has_value());
/// assert!(!it.advance());
/// ```
pub struct QueryIter<'a> {
    source: &'a [u8],
    pos: usize,
    key: Span,
    value: Span,
    has_value: bool,
    /// The previous field ended on an `&` that was the last input byte, so one
    /// empty field is still owed.
    trailing_field: bool,
}

impl<'a> QueryIter<'a> {
    /// A cursor positioned before the first pair of `source`.
    #[must_use]
    pub const fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            pos: 0,
            key: Span::empty(0),
            value: Span::empty(0),
            has_value: false,
            trailing_field: false,
        }
    }

    /// Rebinds the cursor to `source` and rewinds it, discarding all previous
    /// state.
    pub fn reset(&mut self, source: &'a [u8]) {
        trace!(len = source.len(), "query cursor reset");
        *self = Self::new(source);
    }

    /// Moves to the next pair.
    ///
    /// Returns `false` once the input is exhausted; the accessors then keep
    /// describing the last pair produced.
    pub fn advance(&mut self) -> bool {
        let len = self.source.len();
        if self.pos >= len {
            if !self.trailing_field {
                trace!(position = self.pos, "query cursor exhausted");
                return false;
            }
            self.trailing_field = false;
            self.key = Span::empty(len);
            self.value = Span::empty(len);
            self.has_value = false;
            return true;
        }

        let start = self.pos;
        let rest = &self.source[start..];

        // Absolute offset of the `&` closing this field, if any.
        let amp = match rest.find_byteset(b"=&") {
            Some(i) if rest[i] == b'=' => {
                let value_start = start + i + 1;
                let amp = self.source[value_start..]
                    .find_byte(b'&')
                    .map(|j| value_start + j);
                let value_end = amp.unwrap_or(len);
                self.key = Span::new(start, i);
                self.value = Span::new(value_start, value_end - value_start);
                self.has_value = true;
                amp
            }
            Some(i) => {
                self.key = Span::new(start, i);
                self.value = Span::empty(start + i);
                self.has_value = false;
                Some(start + i)
            }
            None => {
                self.key = Span::new(start, len - start);
                self.value = Span::empty(len);
                self.has_value = false;
                None
            }
        };

        match amp {
            Some(amp) => {
                self.pos = amp + 1;
                self.trailing_field = self.pos == len;
            }
            None => self.pos = len,
        }
        true
    }

    /// Key of the current pair. Empty before the first successful
    /// [`advance`](Self::advance).
    #[must_use]
    pub fn key(&self) -> &'a [u8] {
        &self.source[self.key.range()]
    }

    /// Value of the current pair, empty if the pair has none.
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        &self.source[self.value.range()]
    }

    /// Where [`key`](Self::key) sits in the source.
    #[must_use]
    pub fn key_span(&self) -> Span {
        self.key
    }

    /// Where [`value`](Self::value) sits in the source.
    #[must_use]
    pub fn value_span(&self) -> Span {
        self.value
    }

    /// Whether the current pair contained an `=`.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// The current pair as a [`Pair`].
    #[must_use]
    pub fn pair(&self) -> Pair<'a> {
        Pair {
            key: self.key(),
            value: self.has_value.then(|| self.value()),
        }
    }

    /// Scan offset into the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the bound source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Whether the bound source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// `true` once [`advance`](Self::advance) can only return `false`.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.source.len() && !self.trailing_field
    }

    /// The bound source buffer.
    #[must_use]
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Advances until a pair whose key equals `key`, returning it.
    ///
    /// Pairs skipped along the way are consumed. Returns `None` if the input
    /// runs out first.
    pub fn find_key(&mut self, key: impl AsRef<[u8]>) -> Option<Pair<'a>> {
        let key = key.as_ref();
        self.find(|pair| pair.key == key)
    }
}

impl Default for QueryIter<'_> {
    fn default() -> Self {
        QueryIter::new(&[])
    }
}

impl fmt::Debug for QueryIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryIter")
            .field("source", &BStr::new(self.source))
            .field("pos", &self.pos)
            .field("key", &self.key)
            .field("value", &self.value)
            .field("has_value", &self.has_value)
            .finish_non_exhaustive()
    }
}

impl<'a> Iterator for QueryIter<'a> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().then(|| self.pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.source.len().saturating_sub(self.pos);
        let upper = if rest == 0 {
            usize::from(self.trailing_field)
        } else {
            // one field per `&`, plus the last
            rest + 1
        };
        (usize::from(upper > 0), Some(upper))
    }
}

impl FusedIterator for QueryIter<'_> {}
