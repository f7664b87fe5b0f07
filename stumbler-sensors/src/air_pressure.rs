// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observation::{AirPressureObservation, PositionObservation};
use futures::Stream;
use std::time::Duration;
use stumbler_core::StreamItem;
use stumbler_runtime::Timer;
use stumbler_stream::CombineWithLatestFromExt;
use stumbler_stream_time::MaxAgeExt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position annotated with the barometer reading current at the time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionWithPressure {
    pub observation: PositionObservation,
    /// `None` when no reading arrived yet or the latest one expired
    pub air_pressure: Option<AirPressureObservation>,
}

/// Annotates each position with the latest air pressure reading younger than `max_age`.
///
/// Emits one item per position, as soon as it arrives. A reading expires `max_age`
/// after it arrived unless a newer one replaces it. The output completes with
/// `positions`; the barometer stream completing only lets its last reading expire.
///
/// # Errors
///
/// An error from either stream is forwarded and ends the output.
///
/// # Examples
///
/// ```rust
/// use stumbler_runtime::TokioTimer;
/// use stumbler_sensors::{
///     with_latest_air_pressure, AirPressureObservation, Position, PositionObservation,
///     PositionSource,
/// };
/// use stumbler_test_utils::{test_channel, unwrap_stream};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let (position_tx, positions) = test_channel::<PositionObservation>();
/// let (pressure_tx, pressures) = test_channel::<AirPressureObservation>();
///
/// let mut annotated =
///     with_latest_air_pressure(positions, pressures, Duration::from_secs(2), TokioTimer);
///
/// pressure_tx.send(AirPressureObservation::new(1009.5, 100)).unwrap();
/// position_tx
///     .send(PositionObservation::new(Position::new(60.17, 24.94, PositionSource::Gps), 150))
///     .unwrap();
///
/// let item = unwrap_stream(&mut annotated, 500).await.unwrap();
/// assert_eq!(item.air_pressure.map(|p| p.air_pressure), Some(1009.5));
/// # }
/// ```
pub fn with_latest_air_pressure<P, A, TM>(
    positions: P,
    pressures: A,
    max_age: Duration,
    timer: TM,
) -> impl Stream<Item = StreamItem<PositionWithPressure>> + Send + Unpin
where
    P: Stream<Item = StreamItem<PositionObservation>> + Send + 'static,
    A: Stream<Item = StreamItem<AirPressureObservation>> + Send + 'static,
    TM: Timer,
{
    let fresh_pressures = pressures.max_age_with_timer(max_age, timer);

    positions.combine_with_latest_from(fresh_pressures, |observation, latest| {
        PositionWithPressure {
            observation,
            air_pressure: latest.flatten(),
        }
    })
}
