//! The collaborator interface the resolver calls into.
//!
//! Resolution suspends in exactly two places: applying a basic effect
//! and asking the player to choose. Both are async so a handler can
//! wait on a UI, a network peer or a test script.

use async_trait::async_trait;
use smallvec::SmallVec;

use crate::core::{GameRng, GameRngState, GameState};
use crate::error::HandlerError;

use super::effect::{BasicEffect, ChoiceEffect};

/// Indices into `ChoiceEffect::options`, in the order chosen.
pub type Selection = SmallVec<[usize; 4]>;

/// Applies basic effects and solicits player choices.
#[async_trait]
pub trait EffectHandler: Send {
    /// Apply `effect` to `state`.
    ///
    /// Called exactly once per basic node the resolver visits. Keeping
    /// counts non-negative is this method's responsibility.
    async fn apply_basic(
        &mut self,
        effect: &BasicEffect,
        state: &mut GameState,
    ) -> Result<(), HandlerError>;

    /// Pick options of `choice`.
    ///
    /// The resolver does not re-check `min_choices..=max_choices`; the
    /// handler must enforce the bounds. An empty selection means the
    /// player backed out and nothing is resolved.
    async fn make_choice(&mut self, choice: &ChoiceEffect) -> Result<Selection, HandlerError>;
}

/// Picks a random selection that respects a choice's bounds.
///
/// For automated play and fuzzing; handlers delegate `make_choice` to it.
#[derive(Clone, Debug)]
pub struct RandomChooser {
    rng: GameRng,
}

impl RandomChooser {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    /// An independent chooser, e.g. one per simulated playthrough.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::from_rng(self.rng.fork())
    }

    /// Checkpoint of the choice stream.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::from_rng(GameRng::from_state(state))
    }

    /// Choose between `min_choices` and `max_choices` distinct options,
    /// clamped to the number of options available.
    pub fn choose(&mut self, choice: &ChoiceEffect) -> Selection {
        let len = choice.options.len();
        let max = usize::try_from(choice.max_choices).unwrap_or(usize::MAX).min(len);
        let min = usize::try_from(choice.min_choices).unwrap_or(usize::MAX).min(max);
        let count = self.rng.count_between(min, max);
        self.rng.distinct_indices(len, count).into_iter().collect()
    }
}
