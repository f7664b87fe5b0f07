// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sensor observations and the stream pipelines built on them.
//!
//! - [`observation`]: position and air-pressure readings stamped with milliseconds
//!   since boot
//! - [`speed`]: [`SmoothenedGpsSpeedSource`], GPS speed smoothed over consecutive fixes
//! - [`air_pressure`]: [`with_latest_air_pressure`], positions annotated with the
//!   latest fresh barometer reading
//!
//! Enable the `serde` feature to serialize observations.

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
mod logging;

pub mod air_pressure;
pub mod observation;
pub mod speed;

pub use air_pressure::{with_latest_air_pressure, PositionWithPressure};
pub use observation::{AirPressureObservation, Position, PositionObservation, PositionSource};
pub use speed::{SmoothenedGpsSpeedSource, SmoothingConfig, SpeedSource};
