//! Zero-copy byte utilities for text pipelines.
//!
//! - [`QueryIter`] splits a URL query string into `key=value` pairs, handing
//!   out slices of the caller's buffer. It never allocates and never decodes
//!   `%XX` escapes.
//! - [`base2`] converts bytes to and from ASCII `'0'`/`'1'` digits, most
//!   significant bit first.
//!
//! ```rust
//! use bitquery::{QueryIter, base2};
//!
//! let mut it = QueryIter::new(b"foo=bar&ding=baz");
//! while it.advance() {
//!     assert!(it.has_value());
//! }
//!
//! let mut digits = [0u8; base2::encode_len(1)];
//! let n = base2::encode(&mut digits, &[0xA5]).unwrap();
//! assert_eq!(&digits[..n], b"10100101");
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod trace;

pub mod base2;
mod error;
mod query;

pub use base2::{Base2Display, DecodeOptions, DigitPolicy, TrailingBits};
pub use error::Base2Error;
pub use query::{Pair, QueryIter, Span};
