// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combines N streams, emitting whenever *any* of them emits.
//!
//! Unlike a classic `combine_latest`, [`combine_any`](CombineAnyExt::combine_any) does
//! not wait for every input to produce a value. The combiner receives a
//! [`LatestSlots`] snapshot in which inputs that have not emitted yet are `None`.
//!
//! # Behavior
//!
//! - One slot per input, initially `None`
//! - An arrival on input `i` replaces slot `i`, then the combiner runs on an owned copy
//!   of all slots and its result is emitted
//! - Inputs are polled fairly; arrivals from different inputs are emitted in the order
//!   they are observed, which under concurrent producers is non-deterministic
//! - An input that completes keeps its last value in its slot; the output completes
//!   only after every input has completed
//! - No inputs: the output completes immediately
//!
//! # Errors
//!
//! The first `StreamItem::Error` from any input is forwarded and the output ends,
//! dropping the remaining inputs.
//!
//! # Examples
//!
//! ```rust
//! use stumbler_stream::CombineAnyExt;
//! use stumbler_test_utils::{test_channel, unwrap_stream};
//!
//! # async fn example() {
//! let (wifi_tx, wifi) = test_channel::<u32>();
//! let (cell_tx, cell) = test_channel::<u32>();
//!
//! // Count of emitters seen by the latest scan of each source
//! let mut total = vec![wifi, cell].combine_any(|slots| slots.present().sum::<u32>());
//!
//! wifi_tx.send(12).unwrap();
//! assert_eq!(unwrap_stream(&mut total, 500).await.unwrap(), 12);
//!
//! cell_tx.send(3).unwrap();
//! assert_eq!(unwrap_stream(&mut total, 500).await.unwrap(), 15);
//! # }
//! ```

use crate::fail_fast::FailFastExt;
use crate::types::LatestSlots;
use futures::stream::{select_all, BoxStream};
use futures::{Stream, StreamExt};
use stumbler_core::StreamItem;

/// Extension trait providing the `combine_any` operator on a collection of streams.
pub trait CombineAnyExt<T>: Sized
where
    T: Clone + Send + 'static,
{
    /// Emits `combiner(snapshot)` every time any input emits.
    ///
    /// See the [module-level documentation](crate::combine_any) for the full contract.
    fn combine_any<R, F>(self, combiner: F) -> impl Stream<Item = StreamItem<R>> + Send + Unpin
    where
        F: FnMut(LatestSlots<T>) -> R + Send + 'static,
        R: Send + 'static;
}

impl<S, T> CombineAnyExt<T> for Vec<S>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    fn combine_any<R, F>(self, combiner: F) -> impl Stream<Item = StreamItem<R>> + Send + Unpin
    where
        F: FnMut(LatestSlots<T>) -> R + Send + 'static,
        R: Send + 'static,
    {
        combine_any(self, combiner)
    }
}

/// Free-function form of [`CombineAnyExt::combine_any`] accepting any iterator of streams.
pub fn combine_any<I, S, T, R, F>(
    streams: I,
    mut combiner: F,
) -> impl Stream<Item = StreamItem<R>> + Send + Unpin
where
    I: IntoIterator<Item = S>,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
    F: FnMut(LatestSlots<T>) -> R + Send + 'static,
    R: Send + 'static,
{
    let inputs: Vec<BoxStream<'static, (usize, StreamItem<T>)>> = streams
        .into_iter()
        .enumerate()
        .map(|(index, stream)| stream.map(move |item| (index, item)).boxed())
        .collect();

    let mut slots: Vec<Option<T>> = vec![None; inputs.len()];

    select_all(inputs)
        .map(move |(index, item)| match item {
            StreamItem::Value(value) => {
                slots[index] = Some(value);
                StreamItem::Value(combiner(LatestSlots::new(slots.clone(), index)))
            }
            StreamItem::Error(e) => {
                warn!("combine_any: input {} failed, terminating: {}", index, e);
                StreamItem::Error(e)
            }
        })
        .fail_fast()
}
