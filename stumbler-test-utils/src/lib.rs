// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the stumbler workspace.
//!
//! Production code builds pipelines by consuming streams; tests need to push values
//! imperatively. The bridge is a tokio unbounded channel whose receiver is exposed as
//! a `Stream<Item = StreamItem<T>>`.
//!
//! ```rust
//! use stumbler_test_utils::{test_channel, unwrap_stream};
//!
//! # async fn example() {
//! let (tx, mut stream) = test_channel();
//! tx.send(1013.25_f32).unwrap();
//! assert_eq!(unwrap_stream(&mut stream, 100).await.unwrap(), 1013.25);
//! # }
//! ```
//!
//! # Modules
//!
//! - `helpers` - assertions on streams and channels
//! - `test_data` - position and air-pressure fixtures

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod test_data;

use futures::{Stream, StreamExt};
use stumbler_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{
    assert_no_element_emitted, assert_no_recv, assert_stream_ended, recv_timeout, unwrap_stream,
    unwrap_value,
};

/// Creates a channel whose stream side wraps every sent value in `StreamItem::Value`.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a channel that carries `StreamItem<T>` as-is, for error propagation tests.
///
/// ```rust
/// use stumbler_core::{StreamItem, StumblerError};
/// use stumbler_test_utils::test_channel_with_errors;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors::<i32>();
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(StumblerError::stream_error("sensor offline"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
