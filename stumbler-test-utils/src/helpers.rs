// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream and channel assertions.
//!
//! Under `tokio::time::pause()` the timeouts below are virtual: an idle runtime
//! auto-advances to the next timer, so a timeout of `n` ms means "within the next
//! `n` ms of virtual time".

use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use stumbler_core::StreamItem;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, timeout};

/// Waits up to `timeout_ms` for the next item.
///
/// # Panics
///
/// If the stream ends or nothing arrives in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("expected an item, but the stream ended"),
        Err(_) => panic!("expected an item within {timeout_ms}ms, got nothing"),
    }
}

/// Unwraps an already received `Option<StreamItem<T>>` down to its value.
///
/// # Panics
///
/// On `None` or `StreamItem::Error`.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(e)) => panic!("expected a value, got error: {e}"),
        None => panic!("expected a value, but the stream ended"),
    }
}

/// Asserts the stream stays silent for `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("expected no output, got {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Asserts the stream completes within `timeout_ms` without emitting anything else.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(item)) => panic!("expected the stream to end, got {item:?}"),
        Err(_) => panic!("expected the stream to end within {timeout_ms}ms"),
    }
}

/// Receives from a channel fed by a spawned consumer, or `None` after `timeout_ms`.
pub async fn recv_timeout<T>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) -> Option<T> {
    timeout(Duration::from_millis(timeout_ms), rx.recv())
        .await
        .ok()
        .flatten()
}

/// Asserts nothing arrives on the channel for `timeout_ms`.
pub async fn assert_no_recv<T: Debug>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) {
    if let Ok(Some(item)) = timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        panic!("expected no message, got {item:?}");
    }
}
