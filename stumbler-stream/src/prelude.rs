// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Glob-importable operator traits.
//!
//! ```
//! use stumbler_stream::prelude::*;
//! ```

pub use crate::combine_any::CombineAnyExt;
pub use crate::combine_with_latest_from::CombineWithLatestFromExt;
pub use crate::fail_fast::FailFastExt;
pub use crate::pairwise::PairwiseExt;
pub use crate::types::LatestSlots;
pub use stumbler_core::{StreamItem, StumblerError};
