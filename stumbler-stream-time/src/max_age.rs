// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Staleness markers.
//!
//! [`max_age_with_timer`](MaxAgeExt::max_age_with_timer) re-emits every value as
//! `Some(value)` and emits `None` once the latest value has gone `duration` without a
//! successor. Downstream code can then stop using a reading that is too old, e.g. an
//! air-pressure sample that no longer describes the current altitude.
//!
//! - A newer value restarts the timer; `None` is emitted at most once per value
//! - When the source completes while a timer is pending, the timer still runs and the
//!   trailing `None` is emitted before the output ends
//! - A source that completes without values yields nothing
//! - A source error is forwarded and the output ends

use futures::Stream;
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use stumbler_core::StreamItem;
use stumbler_runtime::Timer;

/// Extension trait providing the `max_age` operator with an explicit [`Timer`].
pub trait MaxAgeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `Some(value)` per value and `None` when the latest value expires.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stumbler_runtime::TokioTimer;
    /// use stumbler_stream_time::MaxAgeExt;
    /// use stumbler_test_utils::{test_channel, unwrap_stream};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread", start_paused = true)]
    /// # async fn main() {
    /// let (tx, pressure) = test_channel::<f32>();
    /// let mut fresh = pressure.max_age_with_timer(Duration::from_secs(5), TokioTimer);
    ///
    /// tx.send(1009.8).unwrap();
    /// assert_eq!(unwrap_stream(&mut fresh, 100).await.unwrap(), Some(1009.8));
    ///
    /// // Nothing new for five seconds
    /// assert_eq!(unwrap_stream(&mut fresh, 6_000).await.unwrap(), None);
    /// # }
    /// ```
    fn max_age_with_timer<TM>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = StreamItem<Option<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
        TM: Timer;
}

impl<S, T> MaxAgeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Sized,
{
    fn max_age_with_timer<TM>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = StreamItem<Option<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
        TM: Timer,
    {
        Box::pin(MaxAgeStream::<S, TM> {
            stream: self,
            sleep: None,
            timer,
            duration,
            upstream_done: false,
            done: false,
        })
    }
}

/// `max_age(duration)` on the default tokio timer.
#[cfg(feature = "runtime-tokio")]
pub trait MaxAgeWithDefaultTimerExt<T>: MaxAgeExt<T> {
    fn max_age(self, duration: Duration) -> impl Stream<Item = StreamItem<Option<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static;
}

#[cfg(feature = "runtime-tokio")]
impl<S, T> MaxAgeWithDefaultTimerExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Sized,
{
    fn max_age(self, duration: Duration) -> impl Stream<Item = StreamItem<Option<T>>> + Send + Unpin
    where
        Self: Send + 'static,
        T: Send + 'static,
    {
        self.max_age_with_timer(duration, stumbler_runtime::TokioTimer)
    }
}

#[pin_project]
struct MaxAgeStream<S, TM: Timer> {
    #[pin]
    stream: S,
    #[pin]
    sleep: Option<TM::Sleep>,
    timer: TM,
    duration: Duration,
    upstream_done: bool,
    done: bool,
}

impl<S, T, TM> Stream for MaxAgeStream<S, TM>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    type Item = StreamItem<Option<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        if !*this.upstream_done {
            match this.stream.poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    this.sleep.set(Some(this.timer.sleep_future(*this.duration)));
                    return Poll::Ready(Some(StreamItem::Value(Some(value))));
                }
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.done = true;
                    this.sleep.set(None);
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => *this.upstream_done = true,
                Poll::Pending => {}
            }
        }

        match this.sleep.as_mut().as_pin_mut() {
            Some(sleep) => match sleep.poll(cx) {
                Poll::Ready(()) => {
                    debug!("max_age: latest value expired after {:?}", this.duration);
                    this.sleep.set(None);
                    Poll::Ready(Some(StreamItem::Value(None)))
                }
                Poll::Pending => Poll::Pending,
            },
            None if *this.upstream_done => {
                *this.done = true;
                Poll::Ready(None)
            }
            None => Poll::Pending,
        }
    }
}
