use core::{fmt, ops::Range, str::FromStr};

use crate::{
    Error, Result, Timestamp,
    i62::{decode_validated, encode_i32_to_buf, encode_i64_to_buf, validate},
};

const LEN: usize = 28;

/// Nanoseconds per version step in the nanos field.
const VERSION_STRIDE: i64 = 1_000_000_000;

pub(crate) const SECONDS: Range<usize> = 0..6;
pub(crate) const NANOS: Range<usize> = 6..12;
pub(crate) const FINGERPRINT: Range<usize> = 12..18;
pub(crate) const RANDOM: Range<usize> = 18..24;
pub(crate) const COUNT: Range<usize> = 24..26;
pub(crate) const KIND: Range<usize> = 26..28;

/// A 28-character time-sortable unique identifier.
///
/// ```text
///  Offset:  0        6        12            18       24      26     28
///           +--------+--------+-------------+--------+-------+------+
///  Field:   | seconds| nanos  | fingerprint | random | count | kind |
///           +--------+--------+-------------+--------+-------+------+
/// ```
///
/// Every field is a fixed-width [`i62`](crate::i62) number, so comparing two
/// identifiers as strings compares their timestamps first. The nanos field
/// also carries a version: it stores `nanos + (version - 1) * 1e9`.
///
/// A `Tuid` is only ever built from validated bytes, so [`Tuid::as_str`] and
/// the field accessors cannot fail.
///
/// # Example
///
/// ```
/// use tuid::Tuid;
///
/// let id = Tuid::from_components(1_564_573_699, 123_456_789, 42, -7, 3, 12);
/// assert_eq!(id.epoch_seconds(), 1_564_573_699);
/// assert_eq!(id.nanos(), 123_456_789);
/// assert_eq!(id.version(), 1);
/// assert_eq!(id.fingerprint(), 42);
/// assert_eq!(id.random(), -7);
/// assert_eq!(id.count(), 3);
/// assert_eq!(id.kind(), 12);
///
/// let parsed: Tuid = id.as_str().parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuid([u8; LEN]);

impl Tuid {
    /// Length of every identifier, in bytes.
    pub const LEN: usize = LEN;

    /// Builds a version 1 identifier from explicit field values.
    ///
    /// Each value is written at its field width; values wider than the field
    /// wrap with the codec's complement rule.
    #[must_use]
    pub fn from_components(
        seconds: i64,
        nanos: u32,
        fingerprint: i64,
        random: i32,
        count: i32,
        kind: i32,
    ) -> Self {
        let mut buf = [0_u8; Self::LEN];
        encode_i64_to_buf(fingerprint, &mut buf[FINGERPRINT]);
        Self::with_encoded_fingerprint(seconds, nanos, &buf, random, count, kind)
    }

    /// Like [`Tuid::from_components`], but copies the fingerprint field from
    /// `template` instead of encoding it.
    pub(crate) fn with_encoded_fingerprint(
        seconds: i64,
        nanos: u32,
        template: &[u8; Self::LEN],
        random: i32,
        count: i32,
        kind: i32,
    ) -> Self {
        let mut buf = [0_u8; Self::LEN];
        encode_i64_to_buf(seconds, &mut buf[SECONDS]);
        encode_i64_to_buf(i64::from(nanos), &mut buf[NANOS]);
        buf[FINGERPRINT].copy_from_slice(&template[FINGERPRINT]);
        encode_i32_to_buf(random, &mut buf[RANDOM]);
        encode_i32_to_buf(count, &mut buf[COUNT]);
        encode_i32_to_buf(kind, &mut buf[KIND]);
        Self(buf)
    }

    /// Parses an identifier.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLength`] unless `text` is exactly [`Tuid::LEN`]
    ///   bytes
    /// - [`Error::I62`] if `text` contains a byte outside the alphabet
    pub fn parse(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        let Ok(buf) = <[u8; Self::LEN]>::try_from(bytes) else {
            return Err(Error::InvalidLength { len: bytes.len() });
        };
        validate(&buf)?;
        Ok(Self(buf))
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: construction only admits bytes from the I62 alphabet, which
        // is ASCII
        unsafe { core::str::from_utf8_unchecked(&self.0) }
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    fn field(&self, range: Range<usize>, signed: bool) -> i64 {
        decode_validated(&self.0[range], signed)
    }

    /// Whole seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> i64 {
        self.field(SECONDS, true)
    }

    /// Nanosecond of the second.
    pub fn nanos(&self) -> u32 {
        // always in 0..1e9
        self.field(NANOS, true).rem_euclid(VERSION_STRIDE) as u32
    }

    /// Layout version, starting at 1.
    pub fn version(&self) -> i64 {
        self.field(NANOS, true).div_euclid(VERSION_STRIDE) + 1
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp {
            seconds: self.epoch_seconds(),
            nanos: self.nanos(),
        }
    }

    /// The generator fingerprint, read as signed.
    pub fn fingerprint(&self) -> i64 {
        self.field(FINGERPRINT, true)
    }

    /// The generator fingerprint, read as an unsigned magnitude.
    pub fn fingerprint_unsigned(&self) -> u64 {
        self.field(FINGERPRINT, false).unsigned_abs()
    }

    /// The random field, read as signed.
    pub fn random(&self) -> i64 {
        self.field(RANDOM, true)
    }

    /// The random field, read as an unsigned magnitude.
    pub fn random_unsigned(&self) -> u64 {
        self.field(RANDOM, false).unsigned_abs()
    }

    /// The rolling counter.
    pub fn count(&self) -> i32 {
        // two digits always fit
        self.field(COUNT, true) as i32
    }

    /// The caller-supplied identifier type.
    pub fn kind(&self) -> i32 {
        self.field(KIND, true) as i32
    }
}

impl fmt::Display for Tuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Tuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuid")
            .field("id", &self.as_str())
            .field(
                "timestamp",
                &format_args!("{}.{:09}", self.epoch_seconds(), self.nanos()),
            )
            .field("version", &self.version())
            .field("fingerprint", &self.fingerprint())
            .field("random", &self.random())
            .field("count", &self.count())
            .field("kind", &self.kind())
            .finish()
    }
}

impl AsRef<str> for Tuid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Tuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Tuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Tuid> for String {
    fn from(id: Tuid) -> Self {
        id.as_str().to_owned()
    }
}

impl PartialEq<str> for Tuid {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Tuid {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Tuid> for &str {
    fn eq(&self, other: &Tuid) -> bool {
        *self == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::I62Error;
    use rand::{Rng, rng};

    #[test]
    fn layout_is_contiguous() {
        let fields = [SECONDS, NANOS, FINGERPRINT, RANDOM, COUNT, KIND];
        assert_eq!(fields[0].start, 0);
        assert!(fields.windows(2).all(|w| w[0].end == w[1].start));
        assert_eq!(fields[5].end, Tuid::LEN);
    }

    #[test]
    fn parses_a_known_identifier() {
        let id = Tuid::parse("1hsn5f08M0kXzzzyta00089Rzy07").unwrap();
        assert_eq!(id.epoch_seconds(), 1_564_573_699);
        assert_eq!(id.nanos(), 123_456_789);
        assert_eq!(id.version(), 1);
        assert_eq!(id.fingerprint(), -4_242);
        assert_eq!(id.random(), 31_337);
        assert_eq!(id.count(), -2);
        assert_eq!(id.kind(), 7);
        assert_eq!(
            Tuid::from_components(1_564_573_699, 123_456_789, -4_242, 31_337, -2, 7),
            id
        );
    }

    #[test]
    fn fields_round_trip() {
        let mut rng = rng();
        for _ in 0..1_000 {
            let seconds = rng.random_range(0..28_400_117_791_i64);
            let nanos = rng.random_range(0..1_000_000_000_u32);
            let fingerprint = rng.random_range(-28_400_117_792..28_400_117_792_i64);
            let random: i32 = rng.random();
            let count = rng.random_range(-1_922..1_922);
            let kind = rng.random_range(-1_922..1_922);

            let id = Tuid::from_components(seconds, nanos, fingerprint, random, count, kind);
            assert_eq!(id.epoch_seconds(), seconds);
            assert_eq!(id.nanos(), nanos);
            assert_eq!(id.version(), 1);
            assert_eq!(
                id.timestamp(),
                Timestamp {
                    seconds,
                    nanos
                }
            );
            assert_eq!(id.fingerprint(), fingerprint);
            assert_eq!(id.random(), i64::from(random));
            assert_eq!(id.count(), count);
            assert_eq!(id.kind(), kind);
        }
    }

    #[test]
    fn narrow_fields_wrap() {
        let id = Tuid::from_components(0, 0, 0, 0, 1_922, 1_923);
        assert_eq!(id.count(), -1_922);
        assert_eq!(id.kind(), -1_921);
        assert_eq!(&id.as_str()[COUNT], "V0");
        assert_eq!(&id.as_str()[KIND], "V1");
    }

    #[test]
    fn unsigned_accessors_read_raw_magnitudes() {
        let id = Tuid::from_components(0, 0, -1, -1, 0, 0);
        assert_eq!(id.fingerprint(), -1);
        assert_eq!(id.fingerprint_unsigned(), 56_800_235_583);
        assert_eq!(id.random(), -1);
        assert_eq!(id.random_unsigned(), 56_800_235_583);
    }

    #[test]
    fn version_lives_in_the_nanos_field() {
        // nanos field "0000" + two digits of (version - 1) * 1e9 + nanos
        let mut buf = *Tuid::from_components(1, 5, 0, 0, 0, 0).as_bytes();
        encode_i64_to_buf(2 * VERSION_STRIDE + 5, &mut buf[NANOS]);
        let text = core::str::from_utf8(&buf).unwrap();
        let id = Tuid::parse(text).unwrap();
        assert_eq!(id.version(), 3);
        assert_eq!(id.nanos(), 5);
    }

    #[test]
    fn string_order_follows_time() {
        let a = Tuid::from_components(1_564_573_699, 999_999_999, 9, 9, 9, 9);
        let b = Tuid::from_components(1_564_573_700, 0, 0, 0, 0, 0);
        let c = Tuid::from_components(1_564_573_700, 1, -1, -1, -1, -1);
        assert!(a < b && b < c);
        assert!(a.as_str() < b.as_str() && b.as_str() < c.as_str());
    }

    #[test]
    fn rejects_wrong_lengths() {
        for text in ["", "1hsn5f08M0kX", "1hsn5f08M0kXzzzyta00089Rzy070"] {
            assert_eq!(
                Tuid::parse(text),
                Err(Error::InvalidLength { len: text.len() })
            );
        }
        // 27 characters, 28 bytes
        assert!(matches!(
            Tuid::parse("1hsn5f08M0kXzzzyta00089Rzyé"),
            Err(Error::I62(I62Error::InvalidCharacter { index: 26, .. }))
        ));
    }

    #[test]
    fn rejects_foreign_bytes() {
        assert_eq!(
            "1hsn5f08M0kXzzzyta00089Rzy0-".parse::<Tuid>(),
            Err(Error::I62(I62Error::InvalidCharacter {
                byte: b'-',
                index: 27
            }))
        );
    }

    #[test]
    fn string_conversions() {
        let id = Tuid::from_components(1_564_573_699, 0, 1, 2, 3, 4);
        let text = id.to_string();
        assert_eq!(text.len(), Tuid::LEN);
        assert_eq!(id, text.as_str());
        assert_eq!(text.as_str(), id);
        assert_eq!(String::from(id), text);
        assert_eq!(Tuid::try_from(text.as_str()).unwrap(), id);
        assert!(format!("{id:?}").contains("1564573699.000000000"));
    }
}
