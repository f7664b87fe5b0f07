// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstractions used by the time-based stumbler operators.
//!
//! - [`Timer`](timer::Timer): sleeps and a monotonic `now()`, one implementation per runtime.
//! - [`TimeSource`](time_source::TimeSource): "now" in milliseconds, injectable for tests.

pub mod impls;
pub mod time_source;
pub mod timer;

pub use time_source::{TimeSource, TimerClock};
pub use timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioTimer;

#[cfg(feature = "runtime-smol")]
pub use impls::smol::SmolTimer;
