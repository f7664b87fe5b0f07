// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every stumbler crate.
//!
//! - [`StreamItem`] carries either a value or a terminal [`StumblerError`] through a stream.
//! - [`CancellationToken`] and [`StumblerTask`] provide cooperative cancellation for the
//!   few places that spawn background work.
//! - [`HasTimestamp`] exposes the observation time of sensor readings.
//! - [`IntoStream`] lets operators accept anything stream-like.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod cancellation_token;
pub mod error;
pub mod has_timestamp;
pub mod into_stream;
pub mod stream_item;
pub mod stumbler_task;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{Result, StumblerError};
pub use self::has_timestamp::HasTimestamp;
pub use self::into_stream::IntoStream;
pub use self::stream_item::StreamItem;
pub use self::stumbler_task::StumblerTask;
