// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Monotonic "now" in milliseconds.
//!
//! Sensor timestamps on the device are milliseconds since boot. Code that relates a
//! reference timestamp to the current time takes a [`TimeSource`] so tests can pin
//! the clock.

use crate::timer::Timer;

/// A monotonic clock reporting milliseconds in a caller-defined epoch.
pub trait TimeSource: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Any `Fn() -> u64` is a time source.
///
/// ```
/// use stumbler_runtime::TimeSource;
///
/// let fixed = || 1_000_u64;
/// assert_eq!(fixed.now_millis(), 1_000);
/// ```
impl<F> TimeSource for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn now_millis(&self) -> u64 {
        self()
    }
}

/// Milliseconds elapsed on a [`Timer`]'s clock since the clock was created.
///
/// With `TokioTimer` this follows tokio's paused test clock.
#[derive(Clone, Debug)]
pub struct TimerClock<TM: Timer> {
    timer: TM,
    origin: TM::Instant,
    offset_millis: u64,
}

impl<TM: Timer> TimerClock<TM> {
    /// Start counting from zero now.
    pub fn new(timer: TM) -> Self {
        Self::starting_at(timer, 0)
    }

    /// Start counting from `offset_millis` now, e.g. to continue a device uptime.
    pub fn starting_at(timer: TM, offset_millis: u64) -> Self {
        let origin = timer.now();
        Self {
            timer,
            origin,
            offset_millis,
        }
    }
}

impl<TM: Timer> TimeSource for TimerClock<TM> {
    fn now_millis(&self) -> u64 {
        let elapsed = self.timer.now() - self.origin;
        let elapsed = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.offset_millis.saturating_add(elapsed)
    }
}
