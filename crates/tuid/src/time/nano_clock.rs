use core::time::Duration;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use portable_atomic::{AtomicU64, Ordering};

use super::{SystemClock, interface::NANOS_PER_MILLI};
use crate::{ClockSource, Error, Result, TimeSource, Timestamp};

/// Upper bound on sampling rounds in a single [`synchronize`] call,
/// independent of its time budget.
const MAX_PROBE_ATTEMPTS: u64 = 1 << 24;

/// A calibration point tying a monotonic reading to the moment the wall
/// clock ticked over to `realtime_millis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    /// The wall-clock millisecond that just began.
    pub realtime_millis: i64,
    /// Monotonic reading taken at that edge.
    pub monotonic_nanos: i64,
    /// Measurement error bound of `monotonic_nanos`.
    pub jitter_nanos: i64,
}

impl Snapshot {
    /// Maps a monotonic reading onto wall-clock time using this calibration.
    #[must_use]
    pub fn at(&self, monotonic_nanos: i64) -> Timestamp {
        let base = i128::from(self.realtime_millis) * i128::from(NANOS_PER_MILLI);
        let elapsed = i128::from(monotonic_nanos) - i128::from(self.monotonic_nanos);
        Timestamp::from_nanos(base + elapsed)
    }

    /// How far the wall clock has moved away from the monotonic prediction,
    /// in nanoseconds. Positive when the wall clock is ahead.
    fn drift(&self, realtime_millis: i64, monotonic_nanos: i64) -> i64 {
        realtime_millis
            .saturating_sub(self.realtime_millis)
            .saturating_mul(NANOS_PER_MILLI)
            .saturating_sub(monotonic_nanos.saturating_sub(self.monotonic_nanos))
    }
}

/// Probes `source` for a clean millisecond edge.
///
/// Each round reads the monotonic clock, the wall clock twice, then the
/// monotonic clock again. A round succeeds when the two wall readings differ
/// by exactly one millisecond: the edge lies between the two monotonic
/// readings, and their distance is the snapshot's jitter.
///
/// # Errors
///
/// Returns [`Error::ClockProbeExhausted`] if no edge was observed before
/// `budget` elapsed on the monotonic clock.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use tuid::{SystemClock, synchronize};
///
/// let snapshot = synchronize(&SystemClock, Duration::from_millis(100)).unwrap();
/// assert!(snapshot.jitter_nanos >= 0);
/// ```
pub fn synchronize<S>(source: &S, budget: Duration) -> Result<Snapshot>
where
    S: ClockSource + ?Sized,
{
    let budget = i64::try_from(budget.as_nanos()).unwrap_or(i64::MAX);
    let deadline = source.monotonic_nanos().saturating_add(budget);
    let mut attempts = 0;
    while attempts < MAX_PROBE_ATTEMPTS {
        attempts += 1;
        let start = source.monotonic_nanos();
        let before = source.realtime_millis();
        let millis = source.realtime_millis();
        let end = source.monotonic_nanos();
        if millis.wrapping_sub(before) == 1 {
            let jitter = end - start;
            return Ok(Snapshot {
                realtime_millis: millis,
                monotonic_nanos: start + jitter / 2,
                jitter_nanos: jitter,
            });
        }
        if end >= deadline {
            break;
        }
    }
    Err(Error::ClockProbeExhausted { attempts })
}

/// Tuning for a [`NanoClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NanoClockConfig {
    /// Probes run per calibration. The one with the smallest jitter wins.
    pub probes: usize,
    /// Drift allowed between the wall clock and the monotonic prediction,
    /// on top of the snapshot's own jitter, before recalibrating.
    pub drift_tolerance: Duration,
    /// Monotonic time budget for a single probe.
    pub probe_budget: Duration,
}

impl Default for NanoClockConfig {
    fn default() -> Self {
        Self {
            probes: 5,
            drift_tolerance: Duration::from_millis(1),
            probe_budget: Duration::from_millis(50),
        }
    }
}

#[derive(Debug)]
struct Inner<S> {
    source: S,
    config: NanoClockConfig,
    tolerance_nanos: i64,
    snapshot: ArcSwap<Snapshot>,
    calibrating: Mutex<()>,
    calibrations: AtomicU64,
}

/// A nanosecond-resolution wall clock.
///
/// Time is the snapshot's wall-clock millisecond plus the monotonic time
/// elapsed since the snapshot was taken, so readings have the monotonic
/// clock's resolution and never move backward while the snapshot holds.
///
/// Every [`instant`](NanoClock::instant) call also reads the wall clock and
/// compares it with the prediction. When the two drift apart by more than the
/// configured tolerance, one caller recalibrates while the rest keep using
/// the previous snapshot; nobody waits on the probe.
///
/// Cloning is cheap and clones share calibration state.
///
/// # Example
///
/// ```
/// use tuid::{NanoClock, TimeSource};
///
/// let clock = NanoClock::default();
/// let a = clock.instant();
/// let b = clock.instant();
/// assert!(a <= b);
/// ```
#[derive(Debug)]
pub struct NanoClock<S = SystemClock> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for NanoClock<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for NanoClock<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<S: ClockSource> NanoClock<S> {
    /// Calibrates against `source` with [`NanoClockConfig::default`].
    pub fn new(source: S) -> Self {
        Self::with_config(source, NanoClockConfig::default())
    }

    /// Calibrates against `source`. Blocks for the initial probe sequence.
    pub fn with_config(source: S, config: NanoClockConfig) -> Self {
        let snapshot = calibrate(&source, &config);
        let tolerance_nanos = i64::try_from(config.drift_tolerance.as_nanos()).unwrap_or(i64::MAX);
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                tolerance_nanos,
                snapshot: ArcSwap::from_pointee(snapshot),
                calibrating: Mutex::new(()),
                calibrations: AtomicU64::new(0),
            }),
        }
    }

    /// The current time.
    pub fn instant(&self) -> Timestamp {
        let inner = &*self.inner;
        let monotonic = inner.source.monotonic_nanos();
        let snapshot = inner.snapshot.load();
        let realtime = inner.source.realtime_millis();

        let drift = snapshot.drift(realtime, monotonic);
        let slack = inner.tolerance_nanos.saturating_add(snapshot.jitter_nanos);
        if drift > slack || drift < -(NANOS_PER_MILLI.saturating_add(slack)) {
            if let Some(fresh) = self.recalibrate(&snapshot) {
                return fresh.at(inner.source.monotonic_nanos());
            }
        }
        snapshot.at(monotonic)
    }

    /// The calibration currently in use.
    pub fn snapshot(&self) -> Snapshot {
        **self.inner.snapshot.load()
    }

    /// Number of recalibrations since construction. The initial calibration
    /// is not counted.
    pub fn calibrations(&self) -> u64 {
        self.inner.calibrations.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &NanoClockConfig {
        &self.inner.config
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Replaces `observed` with a fresh calibration if drift is confirmed.
    ///
    /// Returns the snapshot to use, or `None` if another caller holds the
    /// calibration lock or the drift was not confirmed.
    fn recalibrate(&self, observed: &Arc<Snapshot>) -> Option<Arc<Snapshot>> {
        let inner = &*self.inner;
        let _guard = inner.calibrating.try_lock()?;

        let current = inner.snapshot.load_full();
        if !Arc::ptr_eq(&current, observed) {
            return Some(current);
        }

        // Confirm with a fresh bracket so a caller preempted between its two
        // reads cannot trigger a probe.
        let m1 = inner.source.monotonic_nanos();
        let realtime = inner.source.realtime_millis();
        let m2 = inner.source.monotonic_nanos();
        let slack = inner.tolerance_nanos.saturating_add(current.jitter_nanos);
        let ahead = current.drift(realtime, m2) > slack;
        let behind = current.drift(realtime, m1) < -(NANOS_PER_MILLI.saturating_add(slack));
        if !ahead && !behind {
            return None;
        }

        let fresh = Arc::new(calibrate(&inner.source, &inner.config));
        inner.snapshot.store(Arc::clone(&fresh));
        inner.calibrations.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            previous_millis = current.realtime_millis,
            realtime_millis = fresh.realtime_millis,
            jitter_nanos = fresh.jitter_nanos,
            "nano clock recalibrated"
        );

        Some(fresh)
    }
}

impl<S: ClockSource> TimeSource for NanoClock<S> {
    fn instant(&self) -> Timestamp {
        Self::instant(self)
    }
}

/// Runs `config.probes` probes and keeps the one with the least jitter,
/// falling back to a coarse reading if none succeed.
fn calibrate<S: ClockSource>(source: &S, config: &NanoClockConfig) -> Snapshot {
    let best = (0..config.probes.max(1))
        .filter_map(|_| synchronize(source, config.probe_budget).ok())
        .min_by_key(|s| s.jitter_nanos);

    best.unwrap_or_else(|| {
        let monotonic_nanos = source.monotonic_nanos();
        let realtime_millis = source.realtime_millis();

        #[cfg(feature = "tracing")]
        tracing::warn!(
            probes = config.probes,
            "no millisecond edge observed, using a coarse clock snapshot"
        );

        Snapshot {
            realtime_millis,
            monotonic_nanos,
            jitter_nanos: NANOS_PER_MILLI,
        }
    })
}
