//! Base-2 codec: every byte becomes eight ASCII `'0'`/`'1'` digits, most
//! significant bit first.
//!
//! Buffers are supplied by the caller. Size them with [`encode_len`] and
//! [`decode_len`]; both are `const` so they work in array lengths.
//!
//! Two call modes exist for decoding:
//! - distinct buffers, [`decode`] / [`decode_with`];
//! - in place, [`decode_in_place`] / [`decode_in_place_with`]. Output byte `i`
//!   comes from digits `8*i..8*i+8`, so it never overwrites unread input.
//!
//! Encoding always expands its input, so there is no in-place encoder; the
//! `&mut` destination cannot alias the source.
//!
//! ```rust
//! use bitquery::base2;
//!
//! let mut buf = *b"0100100001101001";
//! let n = base2::decode_in_place(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"Hi");
//! ```

use core::fmt::{self, Write as _};

use crate::Base2Error;


/// Destination size [`encode`] needs for `n` input bytes, terminator included.
///
/// Computed as `8 * n + 1` without overflow checks.
#[must_use]
pub const fn encode_len(n: usize) -> usize {
    8 * n + 1
}

/// Number of digits [`encode`] writes for `n` input bytes.
#[must_use]
pub const fn encode_strlen(n: usize) -> usize {
    8 * n
}

/// Destination size for decoding `n` digits: `(n + 1) / 8`.
///
/// This is at least the number of whole bytes in `n` digits, which is all the
/// decoder ever writes.
#[must_use]
pub const fn decode_len(n: usize) -> usize {
    (n + 1) / 8
}

/// How bytes other than `'0'` and `'1'` are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitPolicy {
    /// Reject them with [`Base2Error::InvalidDigit`].
    #[default]
    Strict,
    /// Anything but `'0'` is a set bit.
    Lenient,
}

/// What to do with a final group of fewer than eight digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailingBits {
    /// Reject the input with [`Base2Error::TrailingBits`].
    #[default]
    Reject,
    /// Drop the partial group; `n` digits decode to `n / 8` bytes.
    Truncate,
}

/// Decoder configuration.
///
/// The default rejects anything that is not a whole number of `'0'`/`'1'`
/// octets.
///
/// ```rust
/// use bitquery::{DecodeOptions, base2};
///
/// let mut out = [0u8; 1];
/// // 15 digits: the last seven are dropped and never inspected.
/// let n = base2::decode_with(&mut out, b"01000001xxxxxxx", DecodeOptions::LEGACY).unwrap();
/// assert_eq!(&out[..n], b"A");
/// assert!(base2::decode(&mut out, b"01000001xxxxxxx").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Handling of bytes outside `{'0', '1'}`.
    pub digits: DigitPolicy,
    /// Handling of input lengths that are not a multiple of eight.
    pub trailing: TrailingBits,
}

impl DecodeOptions {
    /// Whole octets of `'0'`/`'1'` only. Same as `Default`.
    pub const STRICT: Self = Self {
        digits: DigitPolicy::Strict,
        trailing: TrailingBits::Reject,
    };

    /// Never fails on content: partial groups are dropped and any non-`'0'`
    /// byte is a one bit.
    pub const LEGACY: Self = Self {
        digits: DigitPolicy::Lenient,
        trailing: TrailingBits::Truncate,
    };
}

/// Writes the digits of `src` into `dest`, followed by a NUL byte.
///
/// Returns the number of digits written, `8 * src.len()`; the terminator is
/// not counted. Empty input writes only the terminator.
///
/// # Errors
///
/// [`Base2Error::BufferTooSmall`] if `dest` is shorter than
/// [`encode_len(src.len())`](encode_len). Nothing is written in that case.
pub fn encode(dest: &mut [u8], src: &[u8]) -> Result<usize, Base2Error> {
    let Some(n) = src.len().checked_mul(8) else {
        return Err(Base2Error::BufferTooSmall {
            required: usize::MAX,
            actual: dest.len(),
        });
    };
    if dest.len() <= n {
        return Err(Base2Error::BufferTooSmall {
            required: n + 1,
            actual: dest.len(),
        });
    }

    for (&byte, out) in src.iter().zip(dest.chunks_exact_mut(8)) {
        encode_byte(byte, out);
    }
    dest[n] = 0;
    Ok(n)
}

/// Decodes `src` into `dest` with the default (strict) options.
///
/// # Errors
///
/// See [`decode_with`].
pub fn decode(dest: &mut [u8], src: &[u8]) -> Result<usize, Base2Error> {
    decode_with(dest, src, DecodeOptions::default())
}

/// Decodes `src` into `dest`, returning the number of bytes written.
///
/// # Errors
///
/// - [`Base2Error::TrailingBits`] if the length is not a multiple of eight and
///   `options.trailing` is [`TrailingBits::Reject`];
/// - [`Base2Error::BufferTooSmall`] if `dest` cannot hold `src.len() / 8`
///   bytes;
/// - [`Base2Error::InvalidDigit`] for the first byte outside `{'0', '1'}`
///   under [`DigitPolicy::Strict`].
///
/// `dest` is left untouched on error.
pub fn decode_with(
    dest: &mut [u8],
    src: &[u8],
    options: DecodeOptions,
) -> Result<usize, Base2Error> {
    let groups = check_decode(src, dest.len(), options)?;
    for (out, group) in dest.iter_mut().zip(src.chunks_exact(8)) {
        *out = decode_group(group);
    }
    Ok(groups)
}

/// Decodes `buf` in place with the default (strict) options.
///
/// # Errors
///
/// See [`decode_in_place_with`].
pub fn decode_in_place(buf: &mut [u8]) -> Result<usize, Base2Error> {
    decode_in_place_with(buf, DecodeOptions::default())
}

/// Decodes the digits in `buf` into its own front.
///
/// Returns the decoded length `n`; `buf[..n]` holds the bytes and the rest of
/// the buffer is unspecified.
///
/// # Errors
///
/// As [`decode_with`], minus `BufferTooSmall`, which cannot happen here. The
/// buffer is left untouched on error.
pub fn decode_in_place_with(buf: &mut [u8], options: DecodeOptions) -> Result<usize, Base2Error> {
    let groups = check_decode(buf, buf.len(), options)?;
    for i in 0..groups {
        let byte = decode_group(&buf[8 * i..8 * i + 8]);
        buf[i] = byte;
    }
    Ok(groups)
}

/// Validates a decode request and returns the number of output bytes.
fn check_decode(src: &[u8], capacity: usize, options: DecodeOptions) -> Result<usize, Base2Error> {
    let groups = src.len() / 8;
    let result = if options.trailing == TrailingBits::Reject && src.len() % 8 != 0 {
        Err(Base2Error::TrailingBits { len: src.len() })
    } else if capacity < groups {
        Err(Base2Error::BufferTooSmall {
            required: groups,
            actual: capacity,
        })
    } else if options.digits == DigitPolicy::Strict {
        match src[..groups * 8]
            .iter()
            .position(|&b| b != b'0' && b != b'1')
        {
            Some(offset) => Err(Base2Error::InvalidDigit {
                offset,
                byte: src[offset],
            }),
            None => Ok(groups),
        }
    } else {
        Ok(groups)
    };

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        trace!(error = %err, ?options, "base2 decode rejected");
    }
    result
}

#[inline]
fn encode_byte(byte: u8, out: &mut [u8]) {
    for (shift, digit) in (0..8).rev().zip(out.iter_mut()) {
        *digit = b'0' + ((byte >> shift) & 1);
    }
}

/// Packs eight digits, MSB first. Anything but `'0'` sets its bit.
#[inline]
fn decode_group(group: &[u8]) -> u8 {
    group
        .iter()
        .fold(0u8, |acc, &d| (acc << 1) | u8::from(d != b'0'))
}

/// Formats a byte slice as base-2 digits without allocating.
///
/// ```rust
/// use bitquery::Base2Display;
///
/// assert_eq!(format!("{}", Base2Display(&[0x0F, 0x80])), "0000111110000000");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Base2Display<'a>(pub &'a [u8]);

impl fmt::Display for Base2Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = [0u8; 8];
        for &byte in self.0 {
            encode_byte(byte, &mut digits);
            for d in digits {
                f.write_char(char::from(d))?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
mod owned {
    use alloc::{
        string::{String, ToString},
        vec,
        vec::Vec,
    };

    use super::{Base2Display, decode, decode_in_place};
    use crate::Base2Error;

    /// Encodes `src` into a new `String` (no terminator).
    #[must_use]
    pub fn encode_to_string(src: &[u8]) -> String {
        Base2Display(src).to_string()
    }

    /// Decodes `src` into a new vector with the default (strict) options.
    ///
    /// # Errors
    ///
    /// See [`decode_with`](super::decode_with).
    pub fn decode_to_vec(src: &[u8]) -> Result<Vec<u8>, Base2Error> {
        let mut out = vec![0; src.len() / 8];
        let n = decode(&mut out, src)?;
        out.truncate(n);
        Ok(out)
    }

    /// Decodes the digits held in `buf` in place and shrinks it to the
    /// decoded bytes. On error `buf` is cleared.
    ///
    /// # Errors
    ///
    /// See [`decode_with`](super::decode_with).
    pub fn decode_vec_in_place(buf: &mut Vec<u8>) -> Result<(), Base2Error> {
        match decode_in_place(buf) {
            Ok(n) => {
                buf.truncate(n);
                Ok(())
            }
            Err(err) => {
                buf.clear();
                Err(err)
            }
        }
    }
}

#[cfg(feature = "alloc")]
pub use owned::{decode_to_vec, decode_vec_in_place, encode_to_string};
