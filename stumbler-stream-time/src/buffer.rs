// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-cadence batching.
//!
//! [`buffer_with_timer`](BufferExt::buffer_with_timer) collects values as they arrive
//! and emits everything collected so far once every `window`, whether or not anything
//! arrived. It is meant for batching scan results into periodic reports.
//!
//! - The first window starts when the output is first polled
//! - Every tick emits a `Vec<T>` in arrival order, possibly empty, then starts over
//! - After the source completes, the next tick performs one final emission and the
//!   output ends; a source that completes without values still yields one empty batch
//! - A zero `window` yields a single `StumblerError::InvalidArgument` and ends
//! - A source error is forwarded immediately, collected values are discarded and the
//!   output ends

use futures::Stream;
use pin_project::pin_project;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use stumbler_core::{StreamItem, StumblerError};
use stumbler_runtime::Timer;

/// Extension trait providing the `buffer` operator with an explicit [`Timer`].
pub trait BufferExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits the values collected during each `window`.
    ///
    /// See the [module-level documentation](crate::buffer) for the full contract.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stumbler_runtime::TokioTimer;
    /// use stumbler_stream_time::BufferExt;
    /// use stumbler_test_utils::{test_channel, unwrap_stream};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread", start_paused = true)]
    /// # async fn main() {
    /// let (tx, cells) = test_channel::<u32>();
    /// let mut batches = cells.buffer_with_timer(Duration::from_secs(10), TokioTimer);
    ///
    /// tx.send(24401).unwrap();
    /// tx.send(24491).unwrap();
    ///
    /// assert_eq!(unwrap_stream(&mut batches, 20_000).await.unwrap(), vec![24401, 24491]);
    /// # }
    /// ```
    fn buffer_with_timer<TM>(
        self,
        window: Duration,
        timer: TM,
    ) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
        TM: Timer;
}

impl<S, T> BufferExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Sized,
{
    fn buffer_with_timer<TM>(
        self,
        window: Duration,
        timer: TM,
    ) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
        TM: Timer,
    {
        let rejected = window
            .is_zero()
            .then(|| StumblerError::invalid_argument("buffer window must be greater than zero"));

        Box::pin(BufferStream::<S, T, TM> {
            stream: self,
            sleep: None,
            timer,
            window,
            items: Vec::new(),
            rejected,
            upstream_done: false,
            done: false,
        })
    }
}

/// `buffer(window)` on the default tokio timer.
#[cfg(feature = "runtime-tokio")]
pub trait BufferWithDefaultTimerExt<T>: BufferExt<T> {
    /// Same as [`BufferExt::buffer_with_timer`] with
    /// [`TokioTimer`](stumbler_runtime::TokioTimer).
    fn buffer(self, window: Duration) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static;
}

#[cfg(feature = "runtime-tokio")]
impl<S, T> BufferWithDefaultTimerExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Sized,
{
    fn buffer(self, window: Duration) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
    {
        self.buffer_with_timer(window, stumbler_runtime::TokioTimer)
    }
}

#[pin_project]
struct BufferStream<S, T, TM: Timer> {
    #[pin]
    stream: S,
    #[pin]
    sleep: Option<TM::Sleep>,
    timer: TM,
    window: Duration,
    items: Vec<T>,
    rejected: Option<StumblerError>,
    upstream_done: bool,
    done: bool,
}

impl<S, T, TM> Stream for BufferStream<S, T, TM>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    type Item = StreamItem<Vec<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        if let Some(error) = this.rejected.take() {
            *this.done = true;
            return Poll::Ready(Some(StreamItem::Error(error)));
        }

        if this.sleep.is_none() {
            this.sleep.set(Some(this.timer.sleep_future(*this.window)));
        }

        while !*this.upstream_done {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => this.items.push(value),
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    warn!(
                        "buffer: source failed, discarding {} collected items",
                        this.items.len()
                    );
                    this.items.clear();
                    *this.done = true;
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => *this.upstream_done = true,
                Poll::Pending => break,
            }
        }

        let Some(sleep) = this.sleep.as_mut().as_pin_mut() else {
            return Poll::Pending;
        };

        match sleep.poll(cx) {
            Poll::Ready(()) => {
                let batch = mem::take(this.items);
                debug!("buffer: flushing {} items", batch.len());

                if *this.upstream_done {
                    *this.done = true;
                    this.sleep.set(None);
                } else {
                    this.sleep.set(Some(this.timer.sleep_future(*this.window)));
                }

                Poll::Ready(Some(StreamItem::Value(batch)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
