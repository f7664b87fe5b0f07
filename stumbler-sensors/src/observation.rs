// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timestamped sensor readings.
//!
//! Timestamps are milliseconds since boot, the clock location and sensor providers
//! stamp their readings with. They are comparable with each other but not with wall
//! clock time.

use stumbler_core::HasTimestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Provider a position fix came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PositionSource {
    Gps,
    Network,
    Fused,
}

/// A single position fix.
///
/// Only latitude, longitude and source are always known; the rest depends on what the
/// provider reports. Network fixes typically lack speed and bearing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters
    pub accuracy: Option<f64>,
    /// Altitude in meters above the WGS84 ellipsoid
    pub altitude: Option<f64>,
    /// Instantaneous speed in m/s
    pub speed: Option<f32>,
    /// Bearing in degrees
    pub bearing: Option<f32>,
    pub source: PositionSource,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, source: PositionSource) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            speed: None,
            bearing: None,
            source,
        }
    }

    #[must_use]
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    #[must_use]
    pub fn with_altitude(mut self, meters: f64) -> Self {
        self.altitude = Some(meters);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, meters_per_second: f32) -> Self {
        self.speed = Some(meters_per_second);
        self
    }

    #[must_use]
    pub fn with_bearing(mut self, degrees: f32) -> Self {
        self.bearing = Some(degrees);
        self
    }
}

/// A position together with the time it was observed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionObservation {
    pub position: Position,
    pub timestamp: u64,
}

impl PositionObservation {
    pub fn new(position: Position, timestamp: u64) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

impl HasTimestamp for PositionObservation {
    type Timestamp = u64;

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// A barometer reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirPressureObservation {
    /// Air pressure in hPa
    pub air_pressure: f32,
    pub timestamp: u64,
}

impl AirPressureObservation {
    pub fn new(air_pressure: f32, timestamp: u64) -> Self {
        Self {
            air_pressure,
            timestamp,
        }
    }
}

impl HasTimestamp for AirPressureObservation {
    type Timestamp = u64;

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
