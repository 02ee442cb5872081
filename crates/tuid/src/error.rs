use crate::i62::I62Error;

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `tuid` can produce.
///
/// Generation itself is infallible: the clock, random source, and fixed-width
/// field encoding never fail once constructed. Errors only surface when
/// parsing text, encoding arbitrary-precision values, or probing a clock
/// source directly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A codec failure: an invalid character, an unrepresentable value, or a
    /// decoded value that does not fit the requested integer type.
    #[error(transparent)]
    I62(#[from] I62Error),

    /// An identifier string was not exactly [`Tuid::LEN`] bytes long.
    ///
    /// [`Tuid::LEN`]: crate::Tuid::LEN
    #[error("invalid tuid length: {len} (expected 28)")]
    InvalidLength {
        /// The length, in bytes, of the rejected input.
        len: usize,
    },

    /// A calibration probe did not observe a clean millisecond transition
    /// within its budget.
    #[error("clock probe exhausted after {attempts} attempts")]
    ClockProbeExhausted {
        /// Number of sampling rounds performed before giving up.
        attempts: u64,
    },
}
