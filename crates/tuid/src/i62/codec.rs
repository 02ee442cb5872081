use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use super::{I62Error, RADIX, ZERO, digit, symbol};

/// Widest field the 32-bit path handles for negative values.
pub const MAX_I32_LEN: usize = 5;
/// Widest field the 64-bit path handles for negative values.
pub const MAX_I64_LEN: usize = 10;
/// Widest complement the arbitrary-precision path searches before reporting
/// [`I62Error::Underflow`]. Requests wider than this extend the search to the
/// requested width.
pub const MAX_BIG_LEN: usize = 511;

/// Default width for `i32`. Round-trips every `i32`.
pub const DEFAULT_I32_LEN: usize = 6;
/// Default width for `i64`. Round-trips every `i64`.
pub const DEFAULT_I64_LEN: usize = 11;
/// Default width for arbitrary-precision values. Round-trips every `i128`.
pub const DEFAULT_BIG_LEN: usize = 22;

const POW62_I32: [i32; MAX_I32_LEN + 1] = {
    let mut table = [1_i32; MAX_I32_LEN + 1];
    let mut i = 1;
    while i <= MAX_I32_LEN {
        table[i] = table[i - 1] * RADIX as i32;
        i += 1;
    }
    table
};

const POW62_I64: [i64; MAX_I64_LEN + 1] = {
    let mut table = [1_i64; MAX_I64_LEN + 1];
    let mut i = 1;
    while i <= MAX_I64_LEN {
        table[i] = table[i - 1] * RADIX as i64;
        i += 1;
    }
    table
};

/// `-(62^MAX_BIG_LEN)`, the smallest value the arbitrary-precision path
/// accepts for widths up to [`MAX_BIG_LEN`].
static MIN_BIG: LazyLock<BigInt> = LazyLock::new(|| -pow62(MAX_BIG_LEN));

fn pow62(len: usize) -> BigInt {
    BigInt::from(RADIX).pow(u32::try_from(len).unwrap_or(u32::MAX))
}

/// Encodes `value` into exactly `len` characters.
///
/// Never fails: values too negative for the 32-bit complement table escalate
/// to the 64-bit path.
///
/// # Example
/// ```
/// use tuid::i62::encode_i32;
///
/// assert_eq!(encode_i32(i32::MAX, 6), "2LKcb1");
/// assert_eq!(encode_i32(i32::MIN, 6), "xefNOy");
/// assert_eq!(encode_i32(0, 3), "000");
/// ```
#[must_use]
pub fn encode_i32(value: i32, len: usize) -> String {
    let mut buf = vec![ZERO; len];
    encode_i32_to_buf(value, &mut buf);
    into_string(buf)
}

/// Encodes `value` into exactly `len` characters.
///
/// Never fails: values too negative for the 64-bit complement table escalate
/// to the arbitrary-precision path, which can always represent an `i64`.
///
/// # Example
/// ```
/// use tuid::i62::encode_i64;
///
/// assert_eq!(encode_i64(i64::MAX, 11), "AzL8n0Y58m7");
/// assert_eq!(encode_i64(i64::MIN, 11), "p0erCzRurDs");
/// assert_eq!(encode_i64(1_564_573_699_000, 7), "RXnjnJI");
/// ```
#[must_use]
pub fn encode_i64(value: i64, len: usize) -> String {
    let mut buf = vec![ZERO; len];
    encode_i64_to_buf(value, &mut buf);
    into_string(buf)
}

/// Encodes an arbitrary-precision `value` into exactly `len` characters.
///
/// # Errors
///
/// Returns [`I62Error::Underflow`] if `value` is below `-(62^w)`, where `w`
/// is the larger of `len` and [`MAX_BIG_LEN`].
pub fn encode_big(value: &BigInt, len: usize) -> Result<String, I62Error> {
    let mut buf = vec![ZERO; len];
    encode_big_to_buf(value, &mut buf)?;
    Ok(into_string(buf))
}

/// Zero-allocation variant of [`encode_i32`]: fills all of `buf`.
pub fn encode_i32_to_buf(value: i32, buf: &mut [u8]) {
    buf.fill(ZERO);
    match complement_i32(value, buf.len()) {
        Some(left) => write_digits(u64::from(left.unsigned_abs()), buf),
        None => encode_i64_to_buf(i64::from(value), buf),
    }
}

/// Zero-allocation variant of [`encode_i64`]: fills all of `buf`.
pub fn encode_i64_to_buf(value: i64, buf: &mut [u8]) {
    buf.fill(ZERO);
    match complement_i64(value, buf.len()) {
        Some(left) => write_digits(left.unsigned_abs(), buf),
        None => write_big_digits(&complement_big(&BigInt::from(value), buf.len()), buf),
    }
}

/// Zero-allocation variant of [`encode_big`]: fills all of `buf`.
///
/// # Errors
///
/// See [`encode_big`].
pub fn encode_big_to_buf(value: &BigInt, buf: &mut [u8]) -> Result<(), I62Error> {
    let len = buf.len();
    if value.sign() == Sign::Minus {
        let underflows = if len > MAX_BIG_LEN {
            *value < -pow62(len)
        } else {
            *value < *MIN_BIG
        };
        if underflows {
            return Err(I62Error::Underflow { len });
        }
    }
    buf.fill(ZERO);
    let left = complement_big(value, len);
    match left.to_u64() {
        Some(small) => write_digits(small, buf),
        None => write_big_digits(&left, buf),
    }
    Ok(())
}

/// Decodes `text` as an `i32`.
///
/// # Errors
///
/// - [`I62Error::InvalidCharacter`] if `text` contains a byte outside the
///   alphabet
/// - [`I62Error::Overflow`] if the decoded value does not fit in an `i32`
///
/// # Example
/// ```
/// use tuid::i62::decode_i32;
///
/// assert_eq!(decode_i32("zzz", true).unwrap(), -1);
/// assert_eq!(decode_i32("zzz", false).unwrap(), 238_327);
/// assert!(decode_i32("zzzzzz", false).is_err());
/// ```
pub fn decode_i32(text: &str, signed: bool) -> Result<i32, I62Error> {
    let value = decode_i64(text, signed)?;
    i32::try_from(value).map_err(|_| I62Error::Overflow { len: text.len() })
}

/// Decodes `text` as an `i64`.
///
/// When `signed`, the upper half of the `text.len()`-digit range is read as
/// negative. Otherwise the raw magnitude is returned.
///
/// # Errors
///
/// - [`I62Error::InvalidCharacter`] if `text` contains a byte outside the
///   alphabet
/// - [`I62Error::Overflow`] if the decoded value does not fit in an `i64`
pub fn decode_i64(text: &str, signed: bool) -> Result<i64, I62Error> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_I64_LEN {
        return decode_big(text, signed)?
            .to_i64()
            .ok_or(I62Error::Overflow { len: bytes.len() });
    }
    let raw = accumulate(bytes, 0)?;
    Ok(if signed {
        uncomplement_i64(raw, bytes.len())
    } else {
        raw
    })
}

/// Decodes `text` as an unsigned magnitude.
///
/// # Errors
///
/// - [`I62Error::InvalidCharacter`] if `text` contains a byte outside the
///   alphabet
/// - [`I62Error::Overflow`] if the magnitude exceeds `u64::MAX`
pub fn decode_u64(text: &str) -> Result<u64, I62Error> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_I64_LEN {
        return decode_big(text, false)?
            .to_u64()
            .ok_or(I62Error::Overflow { len: bytes.len() });
    }
    Ok(accumulate(bytes, 0)?.unsigned_abs())
}

/// Decodes `text` as an arbitrary-precision integer.
///
/// The first ten digits are accumulated on the 64-bit path, the remainder on
/// the arbitrary-precision path.
///
/// # Errors
///
/// Returns [`I62Error::InvalidCharacter`] if `text` contains a byte outside
/// the alphabet.
pub fn decode_big(text: &str, signed: bool) -> Result<BigInt, I62Error> {
    let bytes = text.as_bytes();
    let head = bytes.len().min(MAX_I64_LEN);
    let mut raw = BigUint::from(accumulate(&bytes[..head], 0)?.unsigned_abs());
    for (index, &byte) in bytes.iter().enumerate().skip(head) {
        let d = digit(byte).ok_or(I62Error::InvalidCharacter { byte, index })?;
        raw = raw * RADIX + d;
    }

    let raw = BigInt::from(raw);
    if !signed || bytes.is_empty() {
        return Ok(raw);
    }
    let modulus = pow62(bytes.len());
    if &raw * 2_u8 < modulus {
        Ok(raw)
    } else {
        Ok(raw - modulus)
    }
}

/// Checks that every byte of `bytes` belongs to the alphabet.
pub(crate) fn validate(bytes: &[u8]) -> Result<(), I62Error> {
    match bytes.iter().position(|&b| digit(b).is_none()) {
        Some(index) => Err(I62Error::InvalidCharacter {
            byte: bytes[index],
            index,
        }),
        None => Ok(()),
    }
}

/// Decodes at most [`MAX_I64_LEN`] bytes that were already [`validate`]d.
pub(crate) fn decode_validated(bytes: &[u8], signed: bool) -> i64 {
    debug_assert!(bytes.len() <= MAX_I64_LEN);
    let raw = bytes.iter().fold(0_i64, |acc, &b| {
        acc * i64::from(RADIX) + digit(b).map_or(0, i64::from)
    });
    if signed {
        uncomplement_i64(raw, bytes.len())
    } else {
        raw
    }
}

/// Returns `62^l + value` for the first `l` in `len..=MAX_I32_LEN` where it is
/// non-negative, or `None` if the 32-bit path cannot represent it.
fn complement_i32(value: i32, len: usize) -> Option<i32> {
    if value >= 0 {
        return Some(value);
    }
    (len..=MAX_I32_LEN)
        .map(|l| POW62_I32[l] + value)
        .find(|r| *r >= 0)
}

/// 64-bit counterpart of [`complement_i32`].
fn complement_i64(value: i64, len: usize) -> Option<i64> {
    if value >= 0 {
        return Some(value);
    }
    (len..=MAX_I64_LEN)
        .map(|l| POW62_I64[l] + value)
        .find(|r| *r >= 0)
}

/// Arbitrary-precision counterpart of [`complement_i32`].
///
/// The search is unbounded; callers guarantee termination, either by
/// checking the underflow bound or because the value is a primitive whose
/// magnitude is below `62^11`.
fn complement_big(value: &BigInt, len: usize) -> BigUint {
    if let Some(v) = value.to_biguint() {
        return v;
    }
    let mut base = pow62(len);
    loop {
        if let Some(r) = (&base + value).to_biguint() {
            return r;
        }
        base *= RADIX;
    }
}

/// Writes the low `buf.len()` base-62 digits of `left`, right-aligned.
/// `buf` must already be zero-filled.
fn write_digits(mut left: u64, buf: &mut [u8]) {
    let radix = u64::from(RADIX);
    for slot in buf.iter_mut().rev() {
        if left == 0 {
            break;
        }
        // `left % 62` always fits in a u8
        *slot = symbol((left % radix) as u8);
        left /= radix;
    }
}

fn write_big_digits(left: &BigUint, buf: &mut [u8]) {
    let digits = left.to_radix_be(u32::from(RADIX));
    for (slot, &d) in buf.iter_mut().rev().zip(digits.iter().rev()) {
        *slot = symbol(d);
    }
}

/// Accumulates at most [`MAX_I64_LEN`] digits; `offset` is added to error
/// indices.
fn accumulate(bytes: &[u8], offset: usize) -> Result<i64, I62Error> {
    bytes.iter().enumerate().try_fold(0_i64, |acc, (i, &byte)| {
        let d = digit(byte).ok_or(I62Error::InvalidCharacter {
            byte,
            index: offset + i,
        })?;
        Ok(acc * i64::from(RADIX) + i64::from(d))
    })
}

fn uncomplement_i64(raw: i64, len: usize) -> i64 {
    if len == 0 {
        return raw;
    }
    let modulus = POW62_I64[len];
    if raw < modulus / 2 { raw } else { raw - modulus }
}

fn into_string(buf: Vec<u8>) -> String {
    // SAFETY: every byte written is either `ZERO` or a member of `ALPHABET`,
    // both of which are ASCII.
    unsafe { String::from_utf8_unchecked(buf) }
}
