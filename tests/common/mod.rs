//! Shared test handler for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use ocaso_effects::{
    BasicEffect, ChoiceEffect, EffectHandler, EffectKind, GameState, HandlerError, RandomChooser,
    Selection,
};
use tracing_subscriber::EnvFilter;

/// How `TableHandler` answers choices.
pub enum Picks {
    /// Replay these selections in order, then pick nothing.
    Scripted(VecDeque<Selection>),
    /// Every option, in listed order.
    All,
    Random(RandomChooser),
}

/// Records applied effects, deck changes and offered choices.
///
/// Hunger and stress changes are applied as +1 so that tests can
/// observe state flowing between nodes.
pub struct TableHandler {
    pub applied: Vec<String>,
    /// Kind and card id of every deck-manipulating effect, in order.
    pub deck_changes: Vec<(EffectKind, Option<String>)>,
    pub offered: Vec<(u32, u32, usize)>,
    pub picks: Picks,
}

impl TableHandler {
    pub fn new(picks: Picks) -> Self {
        Self {
            applied: Vec::new(),
            deck_changes: Vec::new(),
            offered: Vec::new(),
            picks,
        }
    }

    pub fn scripted(picks: &[&[usize]]) -> Self {
        Self::new(Picks::Scripted(
            picks.iter().map(|p| Selection::from_slice(p)).collect(),
        ))
    }

    pub fn all() -> Self {
        Self::new(Picks::All)
    }

    pub fn random(seed: u64) -> Self {
        Self::new(Picks::Random(RandomChooser::new(seed)))
    }
}

#[async_trait]
impl EffectHandler for TableHandler {
    async fn apply_basic(
        &mut self,
        effect: &BasicEffect,
        state: &mut GameState,
    ) -> Result<(), HandlerError> {
        match effect.kind {
            EffectKind::ChangeHunger => state.hunger += 1,
            EffectKind::ChangeStress => state.stress += 1,
            _ => {}
        }
        if effect.kind.is_deck_manipulation() {
            self.deck_changes.push((effect.kind, effect.card_id.clone()));
        }
        self.applied.push(effect.description.clone());
        Ok(())
    }

    async fn make_choice(&mut self, choice: &ChoiceEffect) -> Result<Selection, HandlerError> {
        self.offered
            .push((choice.min_choices, choice.max_choices, choice.options.len()));
        let selection = match &mut self.picks {
            Picks::Scripted(queue) => queue.pop_front().unwrap_or_default(),
            Picks::All => (0..choice.options.len()).collect(),
            Picks::Random(chooser) => chooser.choose(choice),
        };
        Ok(selection)
    }
}

/// Install a test subscriber once; `RUST_LOG` controls the output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
