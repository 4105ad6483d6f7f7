//! Tracker id generation.
//!
//! Custom trackers need ids that stay unique on a board and survive a
//! save/load cycle. Ids are drawn from a ChaCha8 stream; seeding it makes
//! id sequences reproducible in tests.
//!
//! ```
//! use bgt_tracker::core::TrackerIds;
//!
//! let mut a = TrackerIds::new(42);
//! let mut b = TrackerIds::new(42);
//! assert_eq!(a.next_id(), b.next_id());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic source of tracker ids.
#[derive(Clone, Debug)]
pub struct TrackerIds {
    inner: ChaCha8Rng,
}

impl TrackerIds {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Next id: 16 lowercase hex digits.
    pub fn next_id(&mut self) -> String {
        format!("{:016x}", self.inner.gen::<u64>())
    }

    /// Next id not accepted by `taken`.
    pub fn next_unused(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl Default for TrackerIds {
    fn default() -> Self {
        Self::from_entropy()
    }
}
