//! Seeded randomness for automated players.
//!
//! Choices made by a bot or a fuzzer have to be replayable: a game log
//! stores the seed, and a bug report stores a checkpoint taken mid-game.
//! `GameRng` is a ChaCha8 stream with both.
//!
//! ```
//! use ocaso_effects::core::GameRng;
//!
//! let mut table = GameRng::new(42);
//! let mut replay = GameRng::new(42);
//! assert_eq!(table.count_between(1, 3), replay.count_between(1, 3));
//!
//! // Playthroughs forked in the same order see the same picks.
//! let mut first = table.fork();
//! let mut first_again = replay.fork();
//! assert_eq!(first.distinct_indices(5, 2), first_again.distinct_indices(5, 2));
//! ```

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Odd constant spreading consecutive fork numbers across the seed space.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Replayable random stream for choice-making.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::at(seed, 0, 0)
    }

    fn at(seed: u64, position: u128, forks: u64) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(seed);
        stream.set_word_pos(position);
        Self { stream, seed, forks }
    }

    /// A child stream for one simulated playthrough.
    ///
    /// The n-th fork of a given seed is always the same stream, and it
    /// does not advance this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// A number of picks in `min..=max`; `min` if the bounds are crossed.
    pub fn count_between(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.stream.gen_range(min..=max)
    }

    /// `amount` distinct indices below `len`, in pick order.
    ///
    /// Asking for more than `len` yields every index.
    pub fn distinct_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.stream, len, amount.min(len)).into_vec()
    }

    /// Where the stream stands, for saving with a game log.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            position: self.stream.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume exactly where `state` was taken.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::at(state.seed, state.position, state.forks)
    }
}

/// A saved `GameRng`. Restoring is O(1) however far the stream ran.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// Words consumed from the ChaCha8 keystream.
    pub position: u128,
    pub forks: u64,
}
