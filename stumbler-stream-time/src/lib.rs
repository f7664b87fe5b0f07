// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-driven operators for sensor streams.
//!
//! - **`BufferExt`** - `.buffer_with_timer(window, timer)`: periodic batches
//! - **`MaxAgeExt`** - `.max_age_with_timer(duration, timer)`: `None` once the value is stale
//! - **`delay_with_min_duration_with_timer`** - wait for the shortest delay hint seen so far
//!
//! Operators take a [`Timer`](stumbler_runtime::Timer) so any runtime can drive them.
//! With the default `runtime-tokio` feature, `BufferWithDefaultTimerExt::buffer`,
//! `MaxAgeWithDefaultTimerExt::max_age` and `delay_with_min_duration` use
//! [`TokioTimer`](stumbler_runtime::TokioTimer), which follows tokio's paused test clock.
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - `TokioTimer` and the default-timer variants
//! - `runtime-smol` - `SmolTimer`; pass it to the `*_with_timer` operators
//!
//! # Example
//!
//! ```rust
//! use stumbler_stream_time::prelude::*;
//! use stumbler_test_utils::{test_channel, unwrap_stream};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (tx, readings) = test_channel::<f32>();
//! let mut batches = readings.buffer(Duration::from_secs(1));
//!
//! tx.send(1012.0).unwrap();
//! drop(tx);
//!
//! assert_eq!(unwrap_stream(&mut batches, 2_000).await.unwrap(), vec![1012.0]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
mod logging;

pub mod buffer;
pub mod delay_with_min_duration;
pub mod max_age;
pub mod prelude;

pub use buffer::BufferExt;
pub use delay_with_min_duration::delay_with_min_duration_with_timer;
pub use max_age::MaxAgeExt;

#[cfg(feature = "runtime-tokio")]
pub use buffer::BufferWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use delay_with_min_duration::delay_with_min_duration;
#[cfg(feature = "runtime-tokio")]
pub use max_age::MaxAgeWithDefaultTimerExt;
