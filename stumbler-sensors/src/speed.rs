// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observation::PositionObservation;
use futures::{Stream, StreamExt};
use std::time::Duration;
use stumbler_core::StreamItem;
use stumbler_stream::PairwiseExt;

/// Something that reports the device's current speed in m/s.
pub trait SpeedSource {
    /// Consumes the source and returns its speed readings.
    fn speed_stream(self) -> impl Stream<Item = StreamItem<f64>> + Send + Unpin;
}

/// Tuning of [`SmoothenedGpsSpeedSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Largest timestamp gap between two fixes that still counts as one sequence.
    pub max_gap: Duration,
    /// Weight of the previous speed in the average, in `0.0..=1.0`.
    pub history_weight: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            max_gap: Duration::from_secs(5),
            history_weight: 0.15,
        }
    }
}

impl SmoothingConfig {
    /// Speed for `current`, given the fix observed right before it.
    ///
    /// - No speed on `current`: `0.0`
    /// - Speed on both and at most `max_gap` apart: weighted average of the two
    /// - Otherwise `current`'s speed as is
    pub fn smoothed_speed(
        &self,
        previous: &PositionObservation,
        current: &PositionObservation,
    ) -> f64 {
        let Some(current_speed) = current.position.speed else {
            return 0.0;
        };

        let gap = Duration::from_millis(previous.timestamp.abs_diff(current.timestamp));

        match previous.position.speed {
            Some(previous_speed) if gap <= self.max_gap => {
                f64::from(previous_speed) * self.history_weight
                    + f64::from(current_speed) * (1.0 - self.history_weight)
            }
            Some(_) => {
                debug!("speed smoothing restarted after {:?} without a fix", gap);
                f64::from(current_speed)
            }
            None => f64::from(current_speed),
        }
    }
}

/// Smooths GPS speed jitter using each pair of consecutive fixes.
///
/// Every fix after the first yields one speed value. Smoothing never crosses a gap
/// larger than [`SmoothingConfig::max_gap`], e.g. after the fix was lost.
///
/// # Examples
///
/// ```rust
/// use stumbler_core::StreamItem;
/// use stumbler_sensors::{
///     Position, PositionObservation, PositionSource, SmoothenedGpsSpeedSource, SpeedSource,
/// };
/// use futures::{stream, StreamExt};
///
/// # async fn example() {
/// let fix = |speed, timestamp| {
///     let position = Position::new(60.17, 24.94, PositionSource::Gps).with_speed(speed);
///     StreamItem::Value(PositionObservation::new(position, timestamp))
/// };
///
/// let positions = stream::iter(vec![fix(10.0, 0), fix(20.0, 1_000)]);
/// let speeds: Vec<f64> = SmoothenedGpsSpeedSource::new(positions)
///     .speed_stream()
///     .map(StreamItem::unwrap)
///     .collect()
///     .await;
///
/// assert!((speeds[0] - 18.5).abs() < 1e-9);
/// # }
/// ```
#[derive(Debug)]
pub struct SmoothenedGpsSpeedSource<S> {
    positions: S,
    config: SmoothingConfig,
}

impl<S> SmoothenedGpsSpeedSource<S>
where
    S: Stream<Item = StreamItem<PositionObservation>> + Send + 'static,
{
    pub fn new(positions: S) -> Self {
        Self::with_config(positions, SmoothingConfig::default())
    }

    pub fn with_config(positions: S, config: SmoothingConfig) -> Self {
        Self { positions, config }
    }
}

impl<S> SpeedSource for SmoothenedGpsSpeedSource<S>
where
    S: Stream<Item = StreamItem<PositionObservation>> + Send + 'static,
{
    fn speed_stream(self) -> impl Stream<Item = StreamItem<f64>> + Send + Unpin {
        let config = self.config;

        self.positions.pairwise().map(move |item| {
            item.map(|(previous, current)| config.smoothed_speed(&previous, &current))
        })
    }
}
