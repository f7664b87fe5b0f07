// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminates a stream after its first error.
//!
//! Every stumbler operator treats an upstream failure as terminal: the error is
//! forwarded downstream once, then the stream completes and drops its inputs.
//! [`fail_fast`](FailFastExt::fail_fast) applies the same rule to any stream.
//!
//! # Examples
//!
//! ```rust
//! use stumbler_core::{StreamItem, StumblerError};
//! use stumbler_stream::FailFastExt;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let source = stream::iter(vec![
//!     StreamItem::Value(1),
//!     StreamItem::Error(StumblerError::stream_error("fix lost")),
//!     StreamItem::Value(2),
//! ]);
//!
//! let items: Vec<_> = source.fail_fast().collect().await;
//! assert_eq!(items.len(), 2);
//! assert!(items[1].is_error());
//! # }
//! ```

use futures::stream::FusedStream;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use stumbler_core::StreamItem;

/// Extension trait providing the [`fail_fast`](FailFastExt::fail_fast) operator.
pub trait FailFastExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Forwards values, forwards the first error, then ends.
    fn fail_fast(self) -> FailFast<Self>;
}

impl<S, T> FailFastExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn fail_fast(self) -> FailFast<Self> {
        FailFast {
            stream: self,
            terminated: false,
        }
    }
}

/// Stream returned by [`FailFastExt::fail_fast`].
#[pin_project]
#[derive(Debug)]
pub struct FailFast<S> {
    #[pin]
    stream: S,
    terminated: bool,
}

impl<S, T> Stream for FailFast<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        match this.stream.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Error(e))) => {
                *this.terminated = true;
                Poll::Ready(Some(StreamItem::Error(e)))
            }
            Poll::Ready(None) => {
                *this.terminated = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

impl<S, T> FusedStream for FailFast<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
