// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fail_fast::FailFastExt;
use futures::future::ready;
use futures::{Stream, StreamExt};
use stumbler_core::StreamItem;

/// Extension trait providing the `pairwise` operator.
pub trait PairwiseExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `(previous, current)` for every value after the first.
    ///
    /// The first value is only remembered. `n` values produce `n - 1` pairs and a
    /// stream with fewer than two values emits nothing.
    ///
    /// # Errors
    ///
    /// An upstream error is forwarded and the output ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stumbler_core::StreamItem;
    /// use stumbler_stream::PairwiseExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # async fn example() {
    /// let fixes = stream::iter(vec![1, 2, 3].into_iter().map(StreamItem::Value));
    /// let pairs: Vec<_> = fixes.pairwise().map(StreamItem::unwrap).collect().await;
    /// assert_eq!(pairs, vec![(1, 2), (2, 3)]);
    /// # }
    /// ```
    fn pairwise(self) -> impl Stream<Item = StreamItem<(T, T)>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Clone + Send + 'static;
}

impl<S, T> PairwiseExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Sized,
{
    fn pairwise(self) -> impl Stream<Item = StreamItem<(T, T)>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Clone + Send + 'static,
    {
        let paired = self
            .fail_fast()
            .scan(None::<T>, |previous, item| {
                let out = match item {
                    StreamItem::Value(current) => previous
                        .replace(current.clone())
                        .map(|prev| StreamItem::Value((prev, current))),
                    StreamItem::Error(e) => Some(StreamItem::Error(e)),
                };
                ready(Some(out))
            })
            .filter_map(ready);

        Box::pin(paired)
    }
}
