//! # tuid
//!
//! Time-sortable unique identifiers: 28 ASCII characters over the alphabet
//! `[0-9A-Za-z]`, generated without coordination and safe to compare, store,
//! and index as plain strings.
//!
//! ```text
//! | field         | offset | width | description                        |
//! |---------------|--------|-------|------------------------------------|
//! | epoch_seconds |      0 |     6 | seconds since the Unix epoch       |
//! | nanos+version |      6 |     6 | nanosecond of second (+ version)   |
//! | fingerprint   |     12 |     6 | per-process fingerprint            |
//! | random        |     18 |     6 | random value                       |
//! | count         |     24 |     2 | rolling counter                    |
//! | kind          |     26 |     2 | caller supplied identifier type    |
//! ```
//!
//! Every field is written with the [`i62`] codec, an order-preserving,
//! fixed-width base-62 integer encoding, so string order follows numeric
//! order. Timestamps come from a [`NanoClock`], a nanosecond-resolution clock
//! that maps a monotonic counter onto wall-clock time and recalibrates when
//! the two drift apart.
//!
//! ```
//! use tuid::{Tuid, tuid};
//!
//! let a = tuid(7);
//! let b = tuid(7);
//! assert_ne!(a, b);
//! assert_eq!(a.kind(), 7);
//!
//! let parsed: Tuid = a.as_str().parse().unwrap();
//! assert_eq!(parsed, a);
//! ```

mod error;
mod fingerprint;
mod generator;
pub mod i62;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::error::*;
pub use crate::fingerprint::*;
pub use crate::generator::*;
pub use crate::i62::{I62Error, I62Ext};
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
