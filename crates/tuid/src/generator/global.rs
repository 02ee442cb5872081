//! A process-wide default generator.
//!
//! The clock and generator are built on first use. Calibrating the clock
//! takes a few milliseconds, so the first call is slower than the rest.
//!
//! # Example
//! ```rust
//! use tuid::{tuid, tuid_string};
//!
//! let id = tuid(7);
//! assert_eq!(id.kind(), 7);
//! assert_eq!(tuid_string(0).len(), 28);
//! ```

use std::sync::LazyLock;

use crate::{NanoClock, ThreadRandom, Tuid, TuidGenerator};

static GLOBAL_CLOCK: LazyLock<NanoClock> = LazyLock::new(NanoClock::default);

static GLOBAL_GENERATOR: LazyLock<TuidGenerator<NanoClock, ThreadRandom>> =
    LazyLock::new(|| TuidGenerator::new(GLOBAL_CLOCK.clone(), ThreadRandom));

/// Generates a [`Tuid`] of the given `kind` from the default generator.
pub fn tuid(kind: i32) -> Tuid {
    GLOBAL_GENERATOR.next(kind)
}

/// Like [`tuid`], returning the identifier as a `String`.
pub fn tuid_string(kind: i32) -> String {
    GLOBAL_GENERATOR.next_string(kind)
}

/// The default generator behind [`tuid`].
pub fn default_generator() -> &'static TuidGenerator<NanoClock, ThreadRandom> {
    &GLOBAL_GENERATOR
}

/// The default clock behind [`tuid`].
pub fn default_clock() -> &'static NanoClock {
    &GLOBAL_CLOCK
}
