//! Effect system for card resolution.
//!
//! A card's effect is a tree of nodes:
//! - `Effect`: the six node variants and their builders
//! - `EffectKind`: what a basic effect does
//! - `IterationTarget`: what a `ForEach` counts
//! - `EffectResolver`: walks a tree, calling an `EffectHandler`
//! - `LifecycleFlags`: static discard/remove scan
//! - `render`: the text shown on the card
//! - `validate`: structural checks used at load time
//!
//! ## Design Philosophy
//!
//! The engine never changes the state itself. Basic effects are opaque
//! here and gain meaning in `EffectHandler::apply_basic`; the resolver
//! only decides which of them run, and in what order.

mod effect;
mod handler;
mod kind;
mod lifecycle;
mod resolver;
mod target;
mod text;
mod validate;

pub use effect::{
    BasicEffect, Branch, ChoiceEffect, CompositeEffect, ConditionalEffect, Effect, EffectVariant,
    ForEachEffect, LifecycleMarks, MultiConditionalEffect,
};
pub use handler::{EffectHandler, RandomChooser, Selection};
pub use kind::EffectKind;
pub use lifecycle::{Disposition, LifecycleFlags};
pub use resolver::{Diagnostic, EffectResolver, ResolveReport};
pub use target::IterationTarget;
pub use text::render;
pub use validate::{validate, validate_deep, ValidationError, ValidationReport};
