/// Errors produced by the [`i62`](crate::i62) codec.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum I62Error {
    /// The input contains a byte outside the 62-symbol alphabet.
    #[error("invalid i62 byte {byte:#04x} at index {index}")]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The value is too negative to be represented, even at the widest
    /// arbitrary-precision width.
    #[error("value is too small to encode in {len} digits")]
    Underflow {
        /// The requested field width.
        len: usize,
    },

    /// The decoded value does not fit the requested integer type.
    #[error("decoded {len}-digit value overflows the target integer type")]
    Overflow {
        /// Number of digits in the input.
        len: usize,
    },
}
