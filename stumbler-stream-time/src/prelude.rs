// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub use crate::buffer::BufferExt;
pub use crate::delay_with_min_duration::delay_with_min_duration_with_timer;
pub use crate::max_age::MaxAgeExt;

#[cfg(feature = "runtime-tokio")]
pub use crate::buffer::BufferWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use crate::delay_with_min_duration::delay_with_min_duration;
#[cfg(feature = "runtime-tokio")]
pub use crate::max_age::MaxAgeWithDefaultTimerExt;

pub use stumbler_runtime::Timer;
#[cfg(feature = "runtime-tokio")]
pub use stumbler_runtime::TokioTimer;
#[cfg(feature = "runtime-smol")]
pub use stumbler_runtime::SmolTimer;
