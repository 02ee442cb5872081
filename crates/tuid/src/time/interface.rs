use core::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A point in time relative to the Unix epoch, with nanosecond resolution.
///
/// `nanos` is always in `0..1_000_000_000`, so the derived ordering is
/// chronological.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch. Negative before 1970.
    pub seconds: i64,
    /// Nanosecond of the second.
    pub nanos: u32,
}

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Builds a timestamp from a nanosecond count since the Unix epoch.
    ///
    /// # Example
    ///
    /// ```
    /// use tuid::Timestamp;
    ///
    /// let ts = Timestamp::from_nanos(-1);
    /// assert_eq!(ts.seconds, -1);
    /// assert_eq!(ts.nanos, 999_999_999);
    /// assert_eq!(ts.as_nanos(), -1);
    /// ```
    #[must_use]
    pub const fn from_nanos(total: i128) -> Self {
        let per_second = NANOS_PER_SECOND as i128;
        Self {
            seconds: total.div_euclid(per_second) as i64,
            nanos: total.rem_euclid(per_second) as u32,
        }
    }

    /// Nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn as_nanos(&self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    /// Signed nanoseconds elapsed from `earlier` to `self`.
    #[must_use]
    pub const fn nanos_since(&self, earlier: Self) -> i128 {
        self.as_nanos() - earlier.as_nanos()
    }

    /// Converts to a [`SystemTime`], or `None` if the platform cannot
    /// represent it.
    #[must_use]
    pub fn to_system_time(&self) -> Option<SystemTime> {
        let since = Duration::new(self.seconds.unsigned_abs(), 0);
        let whole = if self.seconds >= 0 {
            UNIX_EPOCH.checked_add(since)
        } else {
            UNIX_EPOCH.checked_sub(since)
        };
        whole?.checked_add(Duration::from_nanos(u64::from(self.nanos)))
    }
}

impl From<Timestamp> for i128 {
    fn from(ts: Timestamp) -> Self {
        ts.as_nanos()
    }
}

/// A source of wall-clock [`Timestamp`]s.
///
/// This is the seam a [`TuidGenerator`](crate::TuidGenerator) reads time
/// through, so tests can substitute a fixed or scripted clock.
///
/// # Example
///
/// ```
/// use tuid::{TimeSource, Timestamp};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn instant(&self) -> Timestamp {
///         Timestamp { seconds: 1_564_573_699, nanos: 0 }
///     }
/// }
///
/// assert_eq!(FixedTime.instant().seconds, 1_564_573_699);
/// ```
pub trait TimeSource {
    /// Returns the current time.
    fn instant(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn instant(&self) -> Timestamp {
        (**self).instant()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn instant(&self) -> Timestamp {
        (**self).instant()
    }
}

/// The raw clocks a [`NanoClock`](crate::NanoClock) is built from.
pub trait ClockSource {
    /// A free-running nanosecond counter with no relation to wall time. Never
    /// decreases.
    fn monotonic_nanos(&self) -> i64;

    /// Wall-clock milliseconds since the Unix epoch. Coarse, and may jump in
    /// either direction when the system clock is corrected.
    fn realtime_millis(&self) -> i64;
}

impl<T: ClockSource + ?Sized> ClockSource for &T {
    fn monotonic_nanos(&self) -> i64 {
        (**self).monotonic_nanos()
    }

    fn realtime_millis(&self) -> i64 {
        (**self).realtime_millis()
    }
}

impl<T: ClockSource + ?Sized> ClockSource for std::sync::Arc<T> {
    fn monotonic_nanos(&self) -> i64 {
        (**self).monotonic_nanos()
    }

    fn realtime_millis(&self) -> i64 {
        (**self).realtime_millis()
    }
}
