// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use stumbler_core::{IntoStream, StreamItem};

/// Secondary items absorbed per poll before yielding back to the executor.
const SECONDARY_BUDGET: usize = 32;

/// Extension trait providing the `combine_with_latest_from` operator.
///
/// The primary stream (self) drives the output. The secondary stream only feeds a
/// single "latest value" slot that every primary value is combined with.
pub trait CombineWithLatestFromExt<A>: Stream<Item = StreamItem<A>> + Sized {
    /// Pairs each primary value with the latest secondary value, if any.
    ///
    /// # Behavior
    ///
    /// - Exactly one output per primary value: `combiner(primary, latest_secondary)`
    /// - `latest_secondary` is `None` until the secondary has emitted
    /// - Secondary values that are ready are absorbed before the next primary value is
    ///   combined; the secondary never gates or delays the primary
    /// - Completes when the primary completes; a completed secondary keeps its last value
    ///
    /// # Errors
    ///
    /// An error from either input is forwarded and ends the output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stumbler_stream::CombineWithLatestFromExt;
    /// use stumbler_test_utils::{test_channel, unwrap_stream};
    ///
    /// # async fn example() {
    /// let (scan_tx, scans) = test_channel::<&'static str>();
    /// let (pressure_tx, pressure) = test_channel::<f32>();
    ///
    /// let mut tagged = scans.combine_with_latest_from(pressure, |scan, hpa| (scan, hpa));
    ///
    /// scan_tx.send("wifi").unwrap();
    /// assert_eq!(unwrap_stream(&mut tagged, 500).await.unwrap(), ("wifi", None));
    ///
    /// pressure_tx.send(1013.2).unwrap();
    /// scan_tx.send("cell").unwrap();
    /// assert_eq!(unwrap_stream(&mut tagged, 500).await.unwrap(), ("cell", Some(1013.2)));
    /// # }
    /// ```
    fn combine_with_latest_from<IS, B, C, F>(
        self,
        other: IS,
        combiner: F,
    ) -> impl Stream<Item = StreamItem<C>> + Send + Unpin
    where
        Self: Send + 'static,
        IS: IntoStream<Item = StreamItem<B>>,
        IS::Stream: Send + 'static,
        A: Send + 'static,
        B: Clone + Send + 'static,
        F: FnMut(A, Option<B>) -> C + Send + 'static;
}

impl<S, A> CombineWithLatestFromExt<A> for S
where
    S: Stream<Item = StreamItem<A>> + Sized,
{
    fn combine_with_latest_from<IS, B, C, F>(
        self,
        other: IS,
        combiner: F,
    ) -> impl Stream<Item = StreamItem<C>> + Send + Unpin
    where
        Self: Send + 'static,
        IS: IntoStream<Item = StreamItem<B>>,
        IS::Stream: Send + 'static,
        A: Send + 'static,
        B: Clone + Send + 'static,
        F: FnMut(A, Option<B>) -> C + Send + 'static,
    {
        Box::pin(CombineWithLatestFrom {
            primary: self,
            secondary: other.into_stream(),
            latest: None,
            combiner,
            secondary_done: false,
            done: false,
        })
    }
}

#[pin_project]
struct CombineWithLatestFrom<P, S, B, F> {
    #[pin]
    primary: P,
    #[pin]
    secondary: S,
    latest: Option<B>,
    combiner: F,
    secondary_done: bool,
    done: bool,
}

impl<P, S, A, B, C, F> Stream for CombineWithLatestFrom<P, S, B, F>
where
    P: Stream<Item = StreamItem<A>>,
    S: Stream<Item = StreamItem<B>>,
    B: Clone,
    F: FnMut(A, Option<B>) -> C,
{
    type Item = StreamItem<C>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        let mut absorbed = 0;
        while !*this.secondary_done {
            if absorbed == SECONDARY_BUDGET {
                // The primary must not see a stale value: yield and finish draining on
                // the next poll.
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            match this.secondary.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    *this.latest = Some(value);
                    absorbed += 1;
                }
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.done = true;
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => *this.secondary_done = true,
                Poll::Pending => break,
            }
        }

        match this.primary.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Value(value))) => {
                let combined = (this.combiner)(value, this.latest.clone());
                Poll::Ready(Some(StreamItem::Value(combined)))
            }
            Poll::Ready(Some(StreamItem::Error(e))) => {
                *this.done = true;
                Poll::Ready(Some(StreamItem::Error(e)))
            }
            Poll::Ready(None) => {
                *this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
