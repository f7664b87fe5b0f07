// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative cancellation.

use crate::CancellationToken;
use futures::future::{select, Either};
use std::future::Future;
use std::pin::pin;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("stumbler-core needs either the `runtime-tokio` or the `runtime-smol` feature");

/// Handle to a spawned background task that is cancelled when dropped.
///
/// The closure receives a [`CancellationToken`] it may poll for graceful shutdown.
/// Independently of that, the spawned future is raced against the token, so a
/// cancelled task stops at its next suspension point even if it never checks.
///
/// - **Tokio** (`runtime-tokio`, default): `tokio::spawn`
/// - **smol** (`runtime-smol`): `smol::spawn(..).detach()`
///
/// ```rust
/// use stumbler_core::StumblerTask;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let ticks = Arc::new(AtomicU32::new(0));
/// let counter = ticks.clone();
///
/// let task = StumblerTask::spawn(|cancel| async move {
///     while !cancel.is_cancelled() {
///         counter.fetch_add(1, Ordering::SeqCst);
///         tokio::task::yield_now().await;
///     }
/// });
///
/// drop(task); // signals cancellation
/// # }
/// ```
#[derive(Debug)]
pub struct StumblerTask {
    cancel: CancellationToken,
}

impl StumblerTask {
    /// Spawn `f(token)` on the active runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());
        let guard = cancel.clone();

        let task = async move {
            let cancelled = guard.cancelled();
            if let Either::Right(_) = select(pin!(future), pin!(cancelled)).await {
                #[cfg(feature = "tracing")]
                tracing::debug!("stumbler task cancelled before completion");
            }
        };

        #[cfg(feature = "runtime-tokio")]
        {
            drop(tokio::spawn(task));
        }

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        {
            smol::spawn(task).detach();
        }

        Self { cancel }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for StumblerTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
