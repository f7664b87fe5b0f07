// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning tokio receivers into operator inputs.

use futures::{Stream, StreamExt};
use stumbler_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Extension trait for `UnboundedReceiver` to feed sensor readings into operators.
pub trait UnboundedReceiverExt<T> {
    /// Wraps every received value in `StreamItem::Value`.
    ///
    /// The stream ends once every sender is dropped and the buffer is drained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stumbler::prelude::*;
    /// use tokio::sync::mpsc;
    ///
    /// # async fn example() {
    /// let (tx, rx) = mpsc::unbounded_channel::<u32>();
    /// let pairs = rx.into_stumbler_stream().pairwise();
    ///
    /// tx.send(1).unwrap();
    /// tx.send(2).unwrap();
    /// drop(tx);
    ///
    /// let pairs: Vec<_> = pairs.map(StreamItem::unwrap).collect().await;
    /// assert_eq!(pairs, vec![(1, 2)]);
    /// # }
    /// ```
    fn into_stumbler_stream(self) -> impl Stream<Item = StreamItem<T>> + Send + Unpin;

    /// Applies `mapper` to every received value.
    ///
    /// Useful when streams of different reading types have to feed the same
    /// [`combine_any`](stumbler_stream::CombineAnyExt::combine_any) call.
    fn into_stumbler_stream_with<U, F>(
        self,
        mapper: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send + Unpin
    where
        F: FnMut(T) -> U + Send + Unpin + 'static,
        U: Send + 'static;
}

impl<T> UnboundedReceiverExt<T> for mpsc::UnboundedReceiver<T>
where
    T: Send + 'static,
{
    fn into_stumbler_stream(self) -> impl Stream<Item = StreamItem<T>> + Send + Unpin {
        UnboundedReceiverStream::new(self).map(StreamItem::Value)
    }

    fn into_stumbler_stream_with<U, F>(
        self,
        mut mapper: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send + Unpin
    where
        F: FnMut(T) -> U + Send + Unpin + 'static,
        U: Send + 'static,
    {
        UnboundedReceiverStream::new(self).map(move |value| StreamItem::Value(mapper(value)))
    }
}
