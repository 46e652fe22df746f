//! Effect resolution - walking an effect tree against game state.
//!
//! The `EffectResolver` dispatches on the node variant, evaluates
//! conditions against the state as it is at that moment, and calls the
//! `EffectHandler` for the two things it cannot do itself: applying a
//! basic effect and asking the player to choose.
//!
//! ## Design
//!
//! - Resolution is sequential. Each handler call is awaited before the
//!   next node is visited, so a condition always sees the effects of
//!   everything resolved before it.
//! - The resolver owns no state. It borrows the `GameState` mutably for
//!   the whole walk, which rules out overlapping resolutions on one state.
//! - Lifecycle marks are ignored here; see `LifecycleFlags`.
//! - Anomalies (unknown keys, unhandled custom conditions, unknown
//!   iteration targets) fall back and are recorded in the report, or
//!   abort resolution when `ResolverConfig::strict` is set.

use std::fmt;

use async_recursion::async_recursion;
use tracing::{debug, instrument, trace, warn};

use crate::conditions::{
    Condition, ConditionContext, ConditionEvaluator, CustomConditionEvaluator,
};
use crate::core::{GameState, ResolverConfig};
use crate::error::{ConditionError, ResolveError};

use super::effect::{ChoiceEffect, Effect, ForEachEffect};
use super::handler::EffectHandler;
use super::target::IterationTarget;

/// An anomaly that resolution worked around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A condition could not be evaluated and was treated as false.
    Condition(ConditionError),
    /// A `ForEach` target outside the vocabulary ran zero times.
    UnknownTarget(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition(error) => write!(f, "{error}"),
            Self::UnknownTarget(target) => write!(f, "unknown for-each target {target:?}"),
        }
    }
}

/// What happened during one resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Number of `apply_basic` calls.
    pub basic_applied: u32,
    /// Number of `make_choice` calls.
    pub choices_made: u32,
    /// Total `ForEach` iterations across the tree.
    pub iterations: u32,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolveReport {
    /// True if nothing had to fall back.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Resolves effect trees.
#[derive(Clone, Default)]
pub struct EffectResolver<'a> {
    config: ResolverConfig,
    custom: Option<&'a dyn CustomConditionEvaluator>,
}

impl<'a> EffectResolver<'a> {
    /// Create a resolver with the default (lenient) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate `custom` conditions with `evaluator`.
    #[must_use]
    pub fn with_custom_conditions(mut self, evaluator: &'a dyn CustomConditionEvaluator) -> Self {
        self.custom = Some(evaluator);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `effect` against `state`, calling into `handler`.
    ///
    /// Handler errors abort resolution immediately; effects already
    /// applied stay applied.
    #[instrument(skip_all, fields(variant = effect.variant().name()))]
    pub async fn resolve<H: EffectHandler>(
        &self,
        effect: &Effect,
        state: &mut GameState,
        handler: &mut H,
    ) -> Result<ResolveReport, ResolveError> {
        let mut report = ResolveReport::default();
        self.resolve_node(effect, state, handler, &mut report, 0).await?;

        debug!(
            basic_applied = report.basic_applied,
            choices_made = report.choices_made,
            iterations = report.iterations,
            diagnostics = report.diagnostics.len(),
            "effect resolved"
        );
        Ok(report)
    }

    #[async_recursion]
    async fn resolve_node(
        &self,
        effect: &Effect,
        state: &mut GameState,
        handler: &mut dyn EffectHandler,
        report: &mut ResolveReport,
        depth: u32,
    ) -> Result<(), ResolveError> {
        if !self.config.allows_depth(depth) {
            return Err(ResolveError::DepthExceeded {
                max: self.config.max_depth,
            });
        }
        trace!(variant = effect.variant().name(), depth, "resolving node");

        match effect {
            Effect::Basic(basic) => {
                handler
                    .apply_basic(basic, state)
                    .await
                    .map_err(ResolveError::Handler)?;
                report.basic_applied += 1;
            }

            Effect::Conditional(cond) => {
                let branch = if self.test_condition(&cond.condition, state, report)? {
                    Some(cond.if_true.as_ref())
                } else {
                    cond.if_false.as_deref()
                };
                if let Some(branch) = branch {
                    self.resolve_node(branch, state, handler, report, depth + 1)
                        .await?;
                }
            }

            Effect::MultiConditional(multi) => {
                let mut taken = None;
                for branch in &multi.branches {
                    if self.test_condition(&branch.condition, state, report)? {
                        taken = Some(&branch.effect);
                        break;
                    }
                }
                if let Some(branch) = taken.or(multi.default.as_deref()) {
                    self.resolve_node(branch, state, handler, report, depth + 1)
                        .await?;
                }
            }

            Effect::Choice(choice) => {
                let selected = self.choose(choice, handler, report).await?;
                for option in selected {
                    self.resolve_node(option, state, handler, report, depth + 1)
                        .await?;
                }
            }

            Effect::ForEach(for_each) => {
                let count = self.iteration_count(for_each, state, report)?;
                report.iterations += count;
                for _ in 0..count {
                    self.resolve_node(&for_each.effect, state, handler, report, depth + 1)
                        .await?;
                }
            }

            Effect::Composite(composite) => {
                for sub_effect in &composite.effects {
                    self.resolve_node(sub_effect, state, handler, report, depth + 1)
                        .await?;
                }
            }
        }

        Ok(())
    }

    fn test_condition(
        &self,
        condition: &Condition,
        state: &GameState,
        report: &mut ResolveReport,
    ) -> Result<bool, ResolveError> {
        let mut ctx = ConditionContext::new(state);
        if let Some(custom) = self.custom {
            ctx = ctx.with_custom_eval(custom);
        }

        let evaluation = ConditionEvaluator::outcome(condition, &ctx);
        if let Some(anomaly) = evaluation.anomaly {
            if self.config.strict {
                return Err(anomaly.into());
            }
            warn!(%anomaly, condition = %condition.description, "condition treated as {}", evaluation.value);
            report.diagnostics.push(Diagnostic::Condition(anomaly));
        }
        Ok(evaluation.value)
    }

    /// Ask the handler to choose and map the selection to options.
    ///
    /// Every index is checked before any option resolves.
    async fn choose<'e>(
        &self,
        choice: &'e ChoiceEffect,
        handler: &mut dyn EffectHandler,
        report: &mut ResolveReport,
    ) -> Result<Vec<&'e Effect>, ResolveError> {
        let selection = handler
            .make_choice(choice)
            .await
            .map_err(ResolveError::Handler)?;
        report.choices_made += 1;

        let len = choice.options.len();
        selection
            .iter()
            .map(|&index| {
                choice
                    .options
                    .get(index)
                    .ok_or(ResolveError::ChoiceOutOfRange { index, len })
            })
            .collect()
    }

    /// Computed once, before the first iteration.
    fn iteration_count(
        &self,
        for_each: &ForEachEffect,
        state: &GameState,
        report: &mut ResolveReport,
    ) -> Result<u32, ResolveError> {
        match IterationTarget::parse(&for_each.target) {
            Some(target) => Ok(target.count(state)),
            None if self.config.strict => Err(ResolveError::UnknownTarget(for_each.target.clone())),
            None => {
                warn!(target = %for_each.target, "unknown for-each target, skipping");
                report
                    .diagnostics
                    .push(Diagnostic::UnknownTarget(for_each.target.clone()));
                Ok(0)
            }
        }
    }
}
