use num_bigint::BigInt;

use super::{
    DEFAULT_BIG_LEN, DEFAULT_I32_LEN, DEFAULT_I64_LEN, I62Error, decode_big, decode_i32,
    decode_i64, encode_big, encode_i32, encode_i64,
};

/// Extension trait for integers that can be written as fixed-width I62 text.
///
/// Implemented for `i32`, `i64`, and [`BigInt`]. Each implementation picks a
/// default width wide enough to round-trip every value of the type.
///
/// # Example
///
/// ```
/// use tuid::I62Ext;
///
/// let text = 1_564_573_699_000_i64.to_i62_len(7).unwrap();
/// assert_eq!(text, "RXnjnJI");
/// assert_eq!(i64::from_i62(&text).unwrap(), 1_564_573_699_000);
///
/// assert_eq!((-1_i32).to_i62().unwrap(), "zzzzzz");
/// assert_eq!(i32::from_i62_unsigned("zzz").unwrap(), 238_327);
/// ```
pub trait I62Ext: Sized {
    /// Width used by [`I62Ext::to_i62`].
    const DEFAULT_LEN: usize;

    /// Encodes `self` at [`I62Ext::DEFAULT_LEN`].
    ///
    /// # Errors
    ///
    /// See [`I62Ext::to_i62_len`].
    fn to_i62(&self) -> Result<String, I62Error> {
        self.to_i62_len(Self::DEFAULT_LEN)
    }

    /// Encodes `self` into exactly `len` characters.
    ///
    /// # Errors
    ///
    /// Only arbitrary-precision values can fail, with
    /// [`I62Error::Underflow`].
    fn to_i62_len(&self, len: usize) -> Result<String, I62Error>;

    /// Decodes signed I62 text.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid character or when the value does not
    /// fit in `Self`.
    fn from_i62(text: &str) -> Result<Self, I62Error>;

    /// Decodes I62 text as an unsigned magnitude.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid character or when the magnitude does
    /// not fit in `Self`.
    fn from_i62_unsigned(text: &str) -> Result<Self, I62Error>;
}

impl I62Ext for i32 {
    const DEFAULT_LEN: usize = DEFAULT_I32_LEN;

    fn to_i62_len(&self, len: usize) -> Result<String, I62Error> {
        Ok(encode_i32(*self, len))
    }

    fn from_i62(text: &str) -> Result<Self, I62Error> {
        decode_i32(text, true)
    }

    fn from_i62_unsigned(text: &str) -> Result<Self, I62Error> {
        decode_i32(text, false)
    }
}

impl I62Ext for i64 {
    const DEFAULT_LEN: usize = DEFAULT_I64_LEN;

    fn to_i62_len(&self, len: usize) -> Result<String, I62Error> {
        Ok(encode_i64(*self, len))
    }

    fn from_i62(text: &str) -> Result<Self, I62Error> {
        decode_i64(text, true)
    }

    fn from_i62_unsigned(text: &str) -> Result<Self, I62Error> {
        decode_i64(text, false)
    }
}

impl I62Ext for BigInt {
    const DEFAULT_LEN: usize = DEFAULT_BIG_LEN;

    fn to_i62_len(&self, len: usize) -> Result<String, I62Error> {
        encode_big(self, len)
    }

    fn from_i62(text: &str) -> Result<Self, I62Error> {
        decode_big(text, true)
    }

    fn from_i62_unsigned(text: &str) -> Result<Self, I62Error> {
        decode_big(text, false)
    }
}
