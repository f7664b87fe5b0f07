// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value subscription.
//!
//! The handler runs on a [`StumblerTask`] worker. Values that arrive while it is busy
//! overwrite a single pending slot, so a slow handler (e.g. persisting a report) never
//! builds up a backlog: it always continues with the newest value.

use crate::subscribe::next_or_cancelled;
use async_trait::async_trait;
use event_listener::Event;
use futures::lock::Mutex;
use futures::Stream;
use std::future::Future;
use std::sync::Arc;
use stumbler_core::{CancellationToken, Result, StreamItem, StumblerTask};

/// Extension trait providing async subscription that skips outdated values.
#[async_trait]
pub trait SubscribeLatestExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Runs `on_next` for the newest value whenever the previous call has finished.
    ///
    /// # Behavior
    ///
    /// - At most one handler call runs at a time
    /// - Values arriving during a call replace each other; only the last one is handled
    ///   next
    /// - A handler error is passed to `on_error` and processing continues
    /// - Cancelling `cancellation_token` drops the pending value and stops; the handler
    ///   receives the same token to abandon in-flight work
    /// - Returns after the stream ends (or the token is cancelled) and the worker is idle
    ///
    /// # Errors
    ///
    /// A `StreamItem::Error` from the stream drops the pending value, waits for the
    /// running call and is returned.
    async fn subscribe_latest<F, Fut, E, OnError>(
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
impl<S, T> SubscribeLatestExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Unpin + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe_latest<F, Fut, E, OnError>(
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
        let latest = Arc::new(Latest::default());
        // Dropping a `StumblerTask` cancels it, so dropping this future stops the worker.
        let mut worker: Option<StumblerTask> = None;
        let mut outcome = Ok(());

        while let Some(item) = next_or_cancelled(&mut self, &cancellation_token).await {
            match item {
                StreamItem::Value(value) => {
                    if !latest.offer(value).await {
                        continue;
                    }

                    // The previous worker, if any, has already left its loop.
                    worker = Some(spawn_worker(
                        Arc::clone(&latest),
                        on_next.clone(),
                        on_error.clone(),
                        cancellation_token.clone(),
                    ));
                }
                StreamItem::Error(e) => {
                    error!("subscribe_latest: stream failed: {}", e);
                    outcome = Err(e);
                    break;
                }
            }
        }

        if outcome.is_err() || cancellation_token.is_cancelled() {
            latest.discard_pending().await;
        }
        latest.wait_idle().await;
        drop(worker);

        outcome
    }
}

fn spawn_worker<T, F, Fut, E, OnError>(
    latest: Arc<Latest<T>>,
    on_next: F,
    on_error: OnError,
    cancellation_token: CancellationToken,
) -> StumblerTask
where
    T: Send + 'static,
    F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    OnError: Fn(E) + Send + Sync + 'static,
    E: Send + 'static,
{
    StumblerTask::spawn(move |worker_cancel| async move {
        while let Some(value) = latest.take_next().await {
            if worker_cancel.is_cancelled() || cancellation_token.is_cancelled() {
                latest.stop().await;
                break;
            }

            if let Err(e) = on_next(value, cancellation_token.clone()).await {
                warn!("subscribe_latest: handler failed, continuing");
                on_error(e);
            }
        }

        debug!("subscribe_latest: worker idle");
        latest.idle.notify(usize::MAX);
    })
}

/// State shared between the subscription loop and its worker.
struct Latest<T> {
    state: Mutex<State<T>>,
    idle: Event,
}

struct State<T> {
    pending: Option<T>,
    processing: bool,
}

impl<T> Latest<T> {
    /// Stores `value` as the next one to handle. True if a worker has to be started.
    async fn offer(&self, value: T) -> bool {
        let mut state = self.state.lock().await;
        state.pending = Some(value);

        if state.processing {
            false
        } else {
            state.processing = true;
            true
        }
    }

    /// Takes the pending value; with none left, marks the worker as finished.
    async fn take_next(&self) -> Option<T> {
        let mut state = self.state.lock().await;
        let next = state.pending.take();
        if next.is_none() {
            state.processing = false;
        }
        next
    }

    async fn discard_pending(&self) {
        self.state.lock().await.pending = None;
    }

    /// Drops the pending value and marks the worker as finished.
    async fn stop(&self) {
        let mut state = self.state.lock().await;
        state.pending = None;
        state.processing = false;
    }

    async fn wait_idle(&self) {
        loop {
            // Listen before checking so a notification in between is not lost.
            let listener = self.idle.listen();
            if !self.state.lock().await.processing {
                return;
            }
            listener.await;
        }
    }
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                pending: None,
                processing: false,
            }),
            idle: Event::new(),
        }
    }
}
