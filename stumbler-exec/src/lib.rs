// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consumers for stumbler streams.
//!
//! - [`SubscribeExt::subscribe`] runs an async handler for every value, in order.
//! - [`SubscribeLatestExt::subscribe_latest`] runs the handler on a background worker
//!   and, while it is busy, keeps only the newest value.
//!
//! Both stop when the stream ends, when the [`CancellationToken`](stumbler_core::CancellationToken)
//! is cancelled, or when the stream yields a `StreamItem::Error`, which is returned.

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
mod logging;

pub mod subscribe;
pub mod subscribe_latest;

pub use subscribe::SubscribeExt;
pub use subscribe_latest::SubscribeLatestExt;
