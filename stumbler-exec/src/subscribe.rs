// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use futures::future::{select, Either};
use futures::stream::{Stream, StreamExt};
use std::future::Future;
use std::pin::pin;
use stumbler_core::{CancellationToken, Result, StreamItem};

/// Extension trait providing sequential async subscription.
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Runs `on_next` for every value, each call completing before the next one starts.
    ///
    /// # Behavior
    ///
    /// - Values are handled in arrival order
    /// - A handler error is passed to `on_error` and processing continues
    /// - Cancelling `cancellation_token` stops the subscription at the next value, or
    ///   right away while waiting for one; the handler receives the same token
    /// - Returns `Ok(())` when the stream ends or the token is cancelled
    ///
    /// # Errors
    ///
    /// A `StreamItem::Error` from the stream ends the subscription and is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use stumbler_core::StreamItem;
    /// use stumbler_exec::SubscribeExt;
    /// use futures::lock::Mutex;
    /// use futures::stream;
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let speeds = Arc::new(Mutex::new(Vec::new()));
    /// let sink = speeds.clone();
    ///
    /// stream::iter(vec![StreamItem::Value(4.2), StreamItem::Value(5.0)])
    ///     .subscribe(
    ///         move |speed: f64, _token| {
    ///             let sink = sink.clone();
    ///             async move {
    ///                 sink.lock().await.push(speed);
    ///                 Ok::<(), std::io::Error>(())
    ///             }
    ///         },
    ///         |_err: std::io::Error| {},
    ///         None,
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(*speeds.lock().await, vec![4.2, 5.0]);
    /// # }
    /// ```
    async fn subscribe<F, Fut, E, OnError>(
        self,
        on_next: F,
        on_error: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Clone + Send + Sync + 'static,
        E: Send + 'static;
}

#[async_trait]
impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Unpin + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe<F, Fut, E, OnError>(
        mut self,
        on_next: F,
        on_error: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Clone + Send + Sync + 'static,
        E: Send + 'static,
    {
        let cancellation_token = cancellation_token.unwrap_or_default();

        while let Some(item) = next_or_cancelled(&mut self, &cancellation_token).await {
            match item {
                StreamItem::Value(value) => {
                    if let Err(e) = on_next(value, cancellation_token.clone()).await {
                        warn!("subscribe: handler failed, continuing");
                        on_error(e);
                    }
                }
                StreamItem::Error(e) => {
                    error!("subscribe: stream failed: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}

/// Next stream item, or `None` once the stream ends or `token` is cancelled.
pub(crate) async fn next_or_cancelled<S>(
    stream: &mut S,
    token: &CancellationToken,
) -> Option<S::Item>
where
    S: Stream + Unpin,
{
    if token.is_cancelled() {
        return None;
    }

    match select(stream.next(), pin!(token.cancelled())).await {
        Either::Left((item, _)) => item,
        Either::Right(((), _)) => None,
    }
}
