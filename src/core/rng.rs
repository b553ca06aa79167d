//! Random number generation for deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical permutations (tests)
//! - **Fresh**: `from_entropy` draws OS entropy, so production rounds never
//!   reuse a permutation sequence and no seed is persisted
//!
//! ## Usage
//!
//! ```
//! use match_fusion::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut cards = vec![1, 2, 3, 4];
//! rng.shuffle(&mut cards);
//!
//! // Same seed, same permutation
//! let mut rng2 = GameRng::new(42);
//! let mut cards2 = vec![1, 2, 3, 4];
//! rng2.shuffle(&mut cards2);
//! assert_eq!(cards, cards2);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// RNG used for deck shuffling.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    ///
    /// Deterministic: intended for tests and replays.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// Every invocation yields an independent stream, so each round gets a
    /// fresh permutation and nothing about the shuffle is persisted.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Shuffle a slice in place with a uniform (Fisher-Yates) permutation.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
