// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod merge;
pub mod pairing;
mod logging;

// Re-export commonly used items
pub use merge::{merge_pairs, OffsetComposer};
pub use pairing::capture_pairs;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "tracing")]
    pub use tracing;
}
