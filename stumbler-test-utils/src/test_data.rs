// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observation fixtures.

use stumbler_sensors::{AirPressureObservation, Position, PositionObservation, PositionSource};

pub const HELSINKI_LATITUDE: f64 = 60.1699;
pub const HELSINKI_LONGITUDE: f64 = 24.9384;

/// Standard atmosphere at sea level, hPa.
pub const SEA_LEVEL_PRESSURE: f32 = 1013.25;

/// A GPS fix in central Helsinki, optionally with a speed in m/s.
pub fn gps_position(speed: Option<f32>) -> Position {
    let position = Position::new(HELSINKI_LATITUDE, HELSINKI_LONGITUDE, PositionSource::Gps)
        .with_accuracy(4.0)
        .with_altitude(12.0);

    match speed {
        Some(speed) => position.with_speed(speed),
        None => position,
    }
}

/// A network-derived fix, which never carries a speed.
pub fn network_position() -> Position {
    Position::new(HELSINKI_LATITUDE, HELSINKI_LONGITUDE, PositionSource::Network)
        .with_accuracy(150.0)
}

/// A GPS observation at `timestamp` ms since boot.
pub fn gps_observation(speed: Option<f32>, timestamp: u64) -> PositionObservation {
    PositionObservation::new(gps_position(speed), timestamp)
}

pub fn network_observation(timestamp: u64) -> PositionObservation {
    PositionObservation::new(network_position(), timestamp)
}

pub fn air_pressure(hpa: f32, timestamp: u64) -> AirPressureObservation {
    AirPressureObservation::new(hpa, timestamp)
}

pub fn sea_level_air_pressure(timestamp: u64) -> AirPressureObservation {
    air_pressure(SEA_LEVEL_PRESSURE, timestamp)
}
