//! # ocaso-effects
//!
//! The effect engine for a card-driven city survival game.
//!
//! Cards carry structured, nested effects: conditionals, multi-way
//! branches, player choices, iteration over live counts and sequences of
//! concrete changes. This crate models those trees, evaluates their
//! conditions, resolves them against a game state, and answers the
//! static questions the table asks of a card (what does it say, should
//! it be discarded or removed, what cards can it add).
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Effect trees come from card data. Nodes have no
//!    tag field; the shape identifies the variant.
//!
//! 2. **The Engine Decides, the Handler Applies**: The resolver picks
//!    which basic effects run and in what order. An `EffectHandler`
//!    supplied by the game applies them and makes choices.
//!
//! 3. **Diagnosable Fallbacks**: Unknown keys and targets fall back the
//!    way the card data expects, but every fallback is logged and
//!    reported. Strict mode turns them into errors.
//!
//! ## Modules
//!
//! - `core`: Game state, key vocabularies, RNG, configuration
//! - `conditions`: Condition algebra and evaluation
//! - `effects`: Effect model, resolver, lifecycle flags, text, validation
//! - `cards`: Card records and the catalog
//! - `error`: Error types

pub mod cards;
pub mod conditions;
pub mod core;
pub mod effects;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CitizenKind, DiscontentKind, GameRng, GameRngState, GameState, HopeKind, ResolverConfig,
    ResourceKind, RoundData, TokenCount,
};

pub use crate::conditions::{
    ComparisonOperator, Condition, ConditionContext, ConditionEvaluator, ConditionType,
    ConditionValue, CustomConditionEvaluator, Evaluation,
};

pub use crate::effects::{
    render, validate, validate_deep, BasicEffect, Branch, ChoiceEffect, CompositeEffect,
    ConditionalEffect, Diagnostic, Disposition, Effect, EffectHandler, EffectKind, EffectResolver,
    EffectVariant, ForEachEffect, IterationTarget, LifecycleFlags, LifecycleMarks,
    MultiConditionalEffect, RandomChooser, ResolveReport, Selection, ValidationError,
    ValidationReport,
};

pub use crate::cards::{Card, CardCatalog, CardType};

pub use crate::error::{CatalogError, ConditionError, HandlerError, ResolveError};
