//! I62: an order-preserving, fixed-width base-62 integer encoding.
//!
//! Values are written with the alphabet `0-9A-Za-z` (ASCII order, so string
//! order and digit order agree), right-aligned and left-padded with `'0'` to
//! the requested width.
//!
//! Negative values are stored with a width-dependent complement bias: the
//! stored magnitude is `62^l + value` for the smallest `l >= len` that makes
//! it non-negative, truncated to `len` digits. When decoding as signed, the
//! upper half of the `len`-digit range maps back to negative values. Values
//! whose magnitude exceeds the field capacity wrap around with that same rule
//! rather than failing:
//!
//! ```
//! use tuid::i62::{decode_i32, encode_i32};
//!
//! assert_eq!(encode_i32(-916_132_832, 5), "00000");
//! assert_eq!(encode_i32(-916_132_833, 5), "zzzzz");
//! assert_eq!(encode_i32(1922, 2), "V0");
//! assert_eq!(decode_i32("V0", true).unwrap(), -1922);
//! ```
//!
//! Encoding starts on a 32-bit path and escalates to 64-bit and then
//! arbitrary precision when the value and width need it. The produced text
//! depends only on the mathematical value and the width, never on which path
//! handled it.

mod alphabet;
mod codec;
mod error;
mod interface;

pub use alphabet::ALPHABET;
pub(crate) use alphabet::*;
pub use codec::*;
pub use error::*;
pub use interface::*;
