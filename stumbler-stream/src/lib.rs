// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value-driven combinators over [`StreamItem`](stumbler_core::StreamItem) streams.
//!
//! | Operator | Emits |
//! |----------|-------|
//! | [`combine_any`](CombineAnyExt::combine_any) | a snapshot of every input's latest value, on any arrival |
//! | [`combine_with_latest_from`](CombineWithLatestFromExt::combine_with_latest_from) | each primary value with the secondary's latest value |
//! | [`pairwise`](PairwiseExt::pairwise) | `(previous, current)` for consecutive values |
//! | [`fail_fast`](FailFastExt::fail_fast) | values until the first error, then that error |
//!
//! Every operator ends after forwarding the first upstream error. Cancellation is drop:
//! dropping an output stream drops its inputs.
//!
//! Time-driven operators live in `stumbler-stream-time`.

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
mod logging;

pub mod combine_any;
pub mod combine_with_latest_from;
pub mod fail_fast;
pub mod pairwise;
pub mod prelude;
pub mod types;

pub use combine_any::{combine_any, CombineAnyExt};
pub use combine_with_latest_from::CombineWithLatestFromExt;
pub use fail_fast::{FailFast, FailFastExt};
pub use pairwise::PairwiseExt;
pub use types::LatestSlots;
