// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Stumbler
//!
//! Time-windowed reactive stream combinators for merging sensor readings.
//!
//! ## Overview
//!
//! Wardriving collects Wi-Fi, cell, Bluetooth, GPS and barometer readings, each on its
//! own stream and at its own pace. Stumbler provides the small operators that glue them
//! together, on top of `futures::Stream`:
//!
//! - **Value-driven** (`stumbler-stream`): `combine_any`, `combine_with_latest_from`,
//!   `pairwise`, `fail_fast`
//! - **Time-driven** (`stumbler-stream-time`): `buffer`, `max_age`,
//!   `delay_with_min_duration`
//! - **Consumers** (`stumbler-exec`): `subscribe`, `subscribe_latest`
//! - **Sensors** (`stumbler-sensors`): observation types, GPS speed smoothing,
//!   air-pressure annotation
//!
//! Every stream carries [`StreamItem`]s. The first error is forwarded and ends the
//! stream; dropping a stream cancels it together with its inputs and timers.
//!
//! ## Quick Start
//!
//! ```rust
//! use stumbler::prelude::*;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (wifi_tx, wifi) = mpsc::unbounded_channel::<&'static str>();
//!
//! // Upload Wi-Fi access points in batches every 10 seconds
//! let mut batches = wifi.into_stumbler_stream().buffer(Duration::from_secs(10));
//!
//! wifi_tx.send("ap-1").unwrap();
//! wifi_tx.send("ap-2").unwrap();
//!
//! let batch = batches.next().await.unwrap().unwrap();
//! assert_eq!(batch, vec!["ap-1", "ap-2"]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod receiver_ext;

pub use receiver_ext::UnboundedReceiverExt;

pub use stumbler_core::{
    CancellationToken, HasTimestamp, IntoStream, Result, StreamItem, StumblerError, StumblerTask,
};
pub use stumbler_runtime::{TimeSource, Timer, TimerClock};
pub use stumbler_sensors::{
    with_latest_air_pressure, AirPressureObservation, Position, PositionObservation,
    PositionSource, PositionWithPressure, SmoothenedGpsSpeedSource, SmoothingConfig, SpeedSource,
};
pub use stumbler_stream::{combine_any, LatestSlots};

#[cfg(feature = "runtime-tokio")]
pub use stumbler_runtime::TokioTimer;

#[cfg(feature = "runtime-smol")]
pub use stumbler_runtime::SmolTimer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::UnboundedReceiverExt;
    pub use futures::StreamExt;
    pub use stumbler_core::{CancellationToken, StreamItem, StumblerError};
    pub use stumbler_exec::{SubscribeExt, SubscribeLatestExt};
    pub use stumbler_sensors::SpeedSource;
    pub use stumbler_stream::prelude::*;
    pub use stumbler_stream_time::prelude::*;
}
