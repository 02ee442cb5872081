use std::sync::LazyLock;

use portable_atomic::{AtomicI64, Ordering};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Instant, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use crate::ClockSource;

/// Origin of [`SystemClock::monotonic_nanos`], fixed on first use.
static MONOTONIC_BASE: LazyLock<Instant> = LazyLock::new(Instant::now);

/// The operating system's clocks: [`Instant`] for the monotonic counter and
/// [`SystemTime`] for the wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn monotonic_nanos(&self) -> i64 {
        i64::try_from(MONOTONIC_BASE.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }

    fn realtime_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Err(e) => i64::try_from(e.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

/// Wraps a [`ClockSource`] and shifts its wall clock by an adjustable number
/// of milliseconds. The monotonic counter passes through untouched.
///
/// Useful for simulating an external wall-clock correction.
///
/// # Example
///
/// ```
/// use tuid::{ClockSource, OffsetClock, SystemClock};
///
/// let clock = OffsetClock::new(SystemClock);
/// let before = clock.realtime_millis();
/// clock.set_offset(60_000);
/// assert!(clock.realtime_millis() >= before + 60_000);
/// ```
#[derive(Debug, Default)]
pub struct OffsetClock<S> {
    source: S,
    offset_millis: AtomicI64,
}

impl<S: ClockSource> OffsetClock<S> {
    /// Wraps `source` with a zero offset.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            offset_millis: AtomicI64::new(0),
        }
    }

    /// Current offset in milliseconds.
    pub fn offset(&self) -> i64 {
        self.offset_millis.load(Ordering::Relaxed)
    }

    /// Replaces the offset.
    pub fn set_offset(&self, millis: i64) {
        self.offset_millis.store(millis, Ordering::Relaxed);
    }

    /// Adds `millis` to the offset.
    pub fn add_offset(&self, millis: i64) {
        self.offset_millis.fetch_add(millis, Ordering::Relaxed);
    }

    /// The wrapped source.
    pub const fn inner(&self) -> &S {
        &self.source
    }
}

impl<S: ClockSource> ClockSource for OffsetClock<S> {
    fn monotonic_nanos(&self) -> i64 {
        self.source.monotonic_nanos()
    }

    fn realtime_millis(&self) -> i64 {
        self.source
            .realtime_millis()
            .saturating_add(self.offset_millis.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_monotonic_never_decreases() {
        let clock = SystemClock;
        let mut last = clock.monotonic_nanos();
        for _ in 0..10_000 {
            let now = clock.monotonic_nanos();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn system_realtime_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.realtime_millis() > 1_577_836_800_000);
    }

    #[test]
    fn offset_shifts_only_the_wall_clock() {
        let clock = OffsetClock::new(SystemClock);
        clock.set_offset(-10_000);
        clock.add_offset(-5_000);
        assert_eq!(clock.offset(), -15_000);

        let plain = SystemClock.realtime_millis();
        let shifted = clock.realtime_millis();
        let gap = plain - shifted;
        assert!((14_000..=16_000).contains(&gap), "gap {gap}");

        let m0 = SystemClock.monotonic_nanos();
        let m1 = clock.monotonic_nanos();
        assert!(m1 >= m0);
    }
}
