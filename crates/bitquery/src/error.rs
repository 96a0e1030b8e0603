use thiserror::Error;

/// Failure reported by the [`base2`](crate::base2) codec.
///
/// Encoding only fails when the destination is too small. Decoding also
/// rejects malformed digit strings, subject to
/// [`DecodeOptions`](crate::DecodeOptions).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base2Error {
    /// The destination buffer cannot hold the output.
    #[error("destination holds {actual} bytes but {required} are required")]
    BufferTooSmall {
        /// Bytes the operation needs to write.
        required: usize,
        /// Length of the buffer that was supplied.
        actual: usize,
    },
    /// A byte other than `'0'` or `'1'` was found in strict mode.
    #[error("invalid binary digit {byte:#04x} at offset {offset}")]
    InvalidDigit {
        /// Offset of the byte within the input.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// The input length is not a multiple of eight digits.
    #[error("input of {len} digits does not divide into whole bytes")]
    TrailingBits {
        /// Length of the rejected input.
        len: usize,
    },
}

impl Base2Error {
    /// The `-1` status code for callers that signal failure through a
    /// negative length.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn legacy_code(self) -> i32 {
        -1
    }
}
