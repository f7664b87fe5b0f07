// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Types that know when they were observed.
///
/// Sensor readings carry the time of observation rather than the time they reach a
/// stream operator; consumers such as speed smoothing compare these timestamps.
///
/// ```
/// use stumbler_core::HasTimestamp;
///
/// struct Beacon {
///     rssi: i16,
///     seen_at_ms: u64,
/// }
///
/// impl HasTimestamp for Beacon {
///     type Timestamp = u64;
///
///     fn timestamp(&self) -> u64 {
///         self.seen_at_ms
///     }
/// }
///
/// let beacon = Beacon { rssi: -70, seen_at_ms: 1_500 };
/// assert_eq!(beacon.timestamp(), 1_500);
/// ```
pub trait HasTimestamp {
    /// The type representing the timestamp
    type Timestamp: Ord + Copy + Send + Sync + std::fmt::Debug;

    /// Returns the time this item was observed.
    fn timestamp(&self) -> Self::Timestamp;
}

impl<T: HasTimestamp> HasTimestamp for &T {
    type Timestamp = T::Timestamp;

    fn timestamp(&self) -> Self::Timestamp {
        (**self).timestamp()
    }
}
