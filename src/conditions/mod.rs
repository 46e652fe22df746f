//! Condition algebra over game state.
//!
//! Conditions are pure predicates: they read `GameState` and never
//! modify it. Games handle `custom` conditions by injecting a
//! [`CustomConditionEvaluator`] into the [`ConditionContext`].

mod condition;
mod evaluator;

pub use condition::{ComparisonOperator, Condition, ConditionType, ConditionValue};
pub use evaluator::{ConditionContext, ConditionEvaluator, CustomConditionEvaluator, Evaluation};
