// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Waiting for the shortest of a changing set of delays.
//!
//! Emitter sources report how long the scanner may wait before the next scan. The
//! hints arrive over time and the scanner waits until `start_time + min(hints)`,
//! re-evaluating every time a new hint arrives.

use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use std::pin::{pin, Pin};
use std::time::Duration;
use stumbler_core::{Result, StreamItem, StumblerError};
use stumbler_runtime::{TimeSource, Timer};

/// Waits until `start_time + minimum hint` on `time_source`'s clock.
///
/// `start_time` and `time_source` share the same unit: monotonic milliseconds.
///
/// - A running minimum of all hints received so far is kept
/// - On every hint the remaining wait is recomputed as `start_time + minimum - now`,
///   saturating at zero; a zero wait returns immediately
/// - A positive wait is started and superseded by the next hint, if one arrives first
/// - Returns once a wait completes without being superseded, including a wait that was
///   pending when the hint stream ended
///
/// # Errors
///
/// - `StumblerError::StreamProcessingError` if the hint stream ends without a hint
/// - The hint stream's own error, if it yields one
///
/// # Examples
///
/// ```rust
/// use stumbler_core::StreamItem;
/// use stumbler_runtime::TokioTimer;
/// use stumbler_stream_time::delay_with_min_duration_with_timer;
/// use futures::stream;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let hints = stream::iter(vec![
///     StreamItem::Value(Duration::from_millis(500)),
///     StreamItem::Value(Duration::from_millis(300)),
/// ]);
///
/// // Scan started at t=0 and it is t=1000 now: both hints have already elapsed.
/// let now = || 1_000_u64;
/// delay_with_min_duration_with_timer(0, &now, hints, TokioTimer).await.unwrap();
/// # }
/// ```
pub async fn delay_with_min_duration_with_timer<S, TS, TM>(
    start_time: u64,
    time_source: &TS,
    durations: S,
    timer: TM,
) -> Result<()>
where
    S: Stream<Item = StreamItem<Duration>>,
    TS: TimeSource + ?Sized,
    TM: Timer,
{
    let mut durations = pin!(durations.fuse());
    let mut minimum: Option<Duration> = None;
    let mut pending: Option<Pin<Box<TM::Sleep>>> = None;

    loop {
        let hint = match pending.as_mut() {
            None => durations.next().await,
            Some(sleep) => match select(durations.next(), sleep.as_mut()).await {
                Either::Left((hint, _)) => hint,
                Either::Right(((), _)) => return Ok(()),
            },
        };

        match hint {
            Some(StreamItem::Value(duration)) => {
                let shortest = minimum.map_or(duration, |current| current.min(duration));
                if minimum != Some(shortest) {
                    debug!("delay_with_min_duration: minimum is now {:?}", shortest);
                }
                minimum = Some(shortest);

                let wait = remaining_wait(start_time, shortest, time_source.now_millis());
                if wait.is_zero() {
                    return Ok(());
                }
                pending = Some(Box::pin(timer.sleep_future(wait)));
            }
            Some(StreamItem::Error(e)) => return Err(e),
            None => {
                return match pending.take() {
                    Some(sleep) => {
                        sleep.await;
                        Ok(())
                    }
                    None => Err(StumblerError::stream_error(
                        "delay hint stream ended without a duration",
                    )),
                }
            }
        }
    }
}

/// [`delay_with_min_duration_with_timer`] on the default tokio timer.
#[cfg(feature = "runtime-tokio")]
pub async fn delay_with_min_duration<S, TS>(
    start_time: u64,
    time_source: &TS,
    durations: S,
) -> Result<()>
where
    S: Stream<Item = StreamItem<Duration>>,
    TS: TimeSource + ?Sized,
{
    delay_with_min_duration_with_timer(
        start_time,
        time_source,
        durations,
        stumbler_runtime::TokioTimer,
    )
    .await
}

fn remaining_wait(start_time: u64, minimum: Duration, now: u64) -> Duration {
    let minimum_ms = u64::try_from(minimum.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(start_time.saturating_add(minimum_ms).saturating_sub(now))
}
