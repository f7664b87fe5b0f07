// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared types of the stumbler-stream operators.

/// Snapshot of the latest value seen on every input of
/// [`combine_any`](crate::CombineAnyExt::combine_any).
///
/// Slot `i` holds the most recent value of input `i`, or `None` while that input has
/// not produced anything yet. The snapshot is an owned copy: later arrivals never
/// change a snapshot already handed to the combiner.
///
/// # Examples
///
/// ```
/// use stumbler_stream::LatestSlots;
///
/// let slots = LatestSlots::new(vec![Some(-71), None], 0);
/// assert_eq!(slots.get(0), Some(&-71));
/// assert_eq!(slots.get(1), None);
/// assert!(!slots.is_complete());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatestSlots<T> {
    slots: Vec<Option<T>>,
    updated: usize,
}

impl<T> LatestSlots<T> {
    /// Creates a snapshot; `updated` is the index of the input that triggered it.
    pub fn new(slots: Vec<Option<T>>, updated: usize) -> Self {
        Self { slots, updated }
    }

    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Latest value of input `index`, `None` if it has not emitted (or is out of range).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Index of the input whose arrival produced this snapshot.
    pub fn updated_index(&self) -> usize {
        self.updated
    }

    /// The value that triggered this snapshot.
    pub fn updated_value(&self) -> Option<&T> {
        self.get(self.updated)
    }

    /// All slots in input order.
    pub fn values(&self) -> &[Option<T>] {
        &self.slots
    }

    /// True once every input has produced at least one value.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Iterates over the inputs that have a value.
    pub fn present(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub fn into_vec(self) -> Vec<Option<T>> {
        self.slots
    }
}
