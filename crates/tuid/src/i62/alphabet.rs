/// The 62 symbols of the encoding. A symbol's index is its digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The zero digit, used for left padding.
pub(crate) const ZERO: u8 = ALPHABET[0];

/// Number base.
pub(crate) const RADIX: u8 = 62;

const NO_VALUE: u8 = 255;

/// Lookup table mapping a byte to its digit value, or [`NO_VALUE`].
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < RADIX {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Returns the digit value of `byte`, or `None` if it is not in the alphabet.
///
/// Any byte outside printable ASCII, including every byte of a multi-byte
/// UTF-8 sequence, is rejected.
#[inline]
pub(crate) const fn digit(byte: u8) -> Option<u8> {
    match LOOKUP[byte as usize] {
        NO_VALUE => None,
        v => Some(v),
    }
}

/// Returns the symbol for a digit value in `0..62`.
#[inline]
pub(crate) const fn symbol(value: u8) -> u8 {
    ALPHABET[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_ascii_sorted() {
        assert!(ALPHABET.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lookup_inverts_alphabet() {
        for (i, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(digit(c), Some(i as u8));
            assert_eq!(symbol(i as u8), c);
        }
    }

    #[test]
    fn lookup_rejects_everything_else() {
        let accepted = (0..=255_u8).filter(|b| digit(*b).is_some()).count();
        assert_eq!(accepted, 62);
        for b in [b'!', b'_', b'-', b' ', 0, 127, 0xC3, 0xFF] {
            assert_eq!(digit(b), None, "byte {b:#x} should be rejected");
        }
    }
}
