//! Core engine types: game state, key vocabularies, RNG, configuration.

pub mod keys;
pub mod state;
pub mod rng;
pub mod config;

pub use keys::{CitizenKind, DiscontentKind, HopeKind, ResourceKind};
pub use state::{GameState, RoundData, TokenCount};
pub use rng::{GameRng, GameRngState};
pub use config::ResolverConfig;
