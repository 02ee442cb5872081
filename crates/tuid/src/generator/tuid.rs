use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    NanoClock, RandSource, ThreadRandom, TimeSource, Tuid, fingerprint,
    i62::{decode_validated, encode_i64_to_buf},
    id::FINGERPRINT,
};

/// A lock-free [`Tuid`] generator suitable for multi-threaded environments.
///
/// Each call reads the clock, bumps an atomic counter, and draws one random
/// `i32`. The fingerprint is encoded once at construction.
///
/// Identifiers from one generator sort in generation order as long as the
/// clock does not move backward. When two calls land on the same nanosecond
/// they are told apart by the counter, and by the random field if the
/// counter has also wrapped around its two-digit field.
///
/// ## See Also
/// - [`tuid`](crate::tuid) for a process-wide default instance
pub struct TuidGenerator<C = NanoClock, R = ThreadRandom>
where
    C: TimeSource,
    R: RandSource<i32>,
{
    clock: C,
    rng: R,
    #[cfg(feature = "cache-padded")]
    counter: crossbeam_utils::CachePadded<AtomicI32>,
    #[cfg(not(feature = "cache-padded"))]
    counter: AtomicI32,
    template: [u8; Tuid::LEN],
}

impl<C, R> TuidGenerator<C, R>
where
    C: TimeSource,
    R: RandSource<i32>,
{
    /// Creates a generator stamped with the process
    /// [`fingerprint`](crate::fingerprint()).
    ///
    /// # Example
    ///
    /// ```
    /// use tuid::{NanoClock, ThreadRandom, TuidGenerator};
    ///
    /// let generator = TuidGenerator::new(NanoClock::default(), ThreadRandom);
    /// let id = generator.next(3);
    /// assert_eq!(id.kind(), 3);
    /// assert_eq!(id.fingerprint(), generator.fingerprint());
    /// ```
    pub fn new(clock: C, rng: R) -> Self {
        Self::with_fingerprint(clock, rng, fingerprint())
    }

    /// Creates a generator with an explicit fingerprint.
    pub fn with_fingerprint(clock: C, rng: R, fingerprint: i64) -> Self {
        Self::from_components(clock, rng, fingerprint, 0)
    }

    /// Creates a generator from explicit component values.
    ///
    /// `initial_count` is the counter value before the first call; the first
    /// identifier carries `initial_count + 1`.
    pub fn from_components(clock: C, rng: R, fingerprint: i64, initial_count: i32) -> Self {
        let mut template = [0_u8; Tuid::LEN];
        encode_i64_to_buf(fingerprint, &mut template[FINGERPRINT]);
        Self {
            clock,
            rng,
            #[cfg(feature = "cache-padded")]
            counter: crossbeam_utils::CachePadded::new(AtomicI32::new(initial_count)),
            #[cfg(not(feature = "cache-padded"))]
            counter: AtomicI32::new(initial_count),
            template,
        }
    }

    /// Generates the next identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use tuid::{NanoClock, ThreadRandom, TuidGenerator};
    ///
    /// let generator = TuidGenerator::with_fingerprint(NanoClock::default(), ThreadRandom, 42);
    /// let a = generator.next(1);
    /// let b = generator.next(1);
    /// assert_eq!(b.count(), a.count() + 1);
    /// assert_eq!(a.fingerprint(), 42);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next(&self, kind: i32) -> Tuid {
        let now = self.clock.instant();
        let count = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let random = self.rng.rand();
        Tuid::with_encoded_fingerprint(now.seconds, now.nanos, &self.template, random, count, kind)
    }

    /// Generates the next identifier as an owned string.
    pub fn next_string(&self, kind: i32) -> String {
        self.next(kind).into()
    }

    /// The fingerprint stamped into every identifier, as it reads back after
    /// truncation to the six-digit field.
    pub fn fingerprint(&self) -> i64 {
        decode_validated(&self.template[FINGERPRINT], true)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C, R> core::fmt::Debug for TuidGenerator<C, R>
where
    C: TimeSource,
    R: RandSource<i32>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TuidGenerator")
            .field("fingerprint", &self.fingerprint())
            .field("count", &self.counter.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
