//! Condition evaluation against game state.
//!
//! Evaluation never panics. When a condition cannot be evaluated
//! meaningfully (unknown key, missing operand, custom condition with no
//! evaluator) the result carries both a fallback value and the
//! anomaly, so callers choose between the lenient fallback and a hard
//! error:
//!
//! - [`ConditionEvaluator::evaluate`]: fallback value, anomaly logged
//! - [`ConditionEvaluator::check`]: anomaly returned as `Err`
//! - [`ConditionEvaluator::outcome`]: both

use tracing::warn;

use crate::core::{CitizenKind, DiscontentKind, GameState, HopeKind, ResourceKind};
use crate::error::ConditionError;

use super::condition::{Condition, ConditionType, ConditionValue};

/// Game-supplied evaluation of `custom` conditions.
pub trait CustomConditionEvaluator: Send + Sync {
    fn evaluate(&self, condition: &Condition, state: &GameState) -> bool;
}

impl<F> CustomConditionEvaluator for F
where
    F: Fn(&Condition, &GameState) -> bool + Send + Sync,
{
    fn evaluate(&self, condition: &Condition, state: &GameState) -> bool {
        self(condition, state)
    }
}

/// Context for evaluating conditions.
#[derive(Clone, Copy)]
pub struct ConditionContext<'a> {
    /// Current game state.
    pub state: &'a GameState,
    /// Custom condition evaluator (provided by the game).
    pub eval_custom: Option<&'a dyn CustomConditionEvaluator>,
}

impl<'a> ConditionContext<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            eval_custom: None,
        }
    }

    pub fn with_custom_eval(mut self, eval: &'a dyn CustomConditionEvaluator) -> Self {
        self.eval_custom = Some(eval);
        self
    }
}

/// Result of evaluating a condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// The condition's value, or the fallback if `anomaly` is set.
    pub value: bool,
    pub anomaly: Option<ConditionError>,
}

impl Evaluation {
    fn ok(value: bool) -> Self {
        Self { value, anomaly: None }
    }

    fn fallback(value: bool, anomaly: ConditionError) -> Self {
        Self {
            value,
            anomaly: Some(anomaly),
        }
    }
}

impl From<Result<bool, ConditionError>> for Evaluation {
    fn from(result: Result<bool, ConditionError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(anomaly) => Self::fallback(false, anomaly),
        }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Lenient evaluation: anomalies are logged and yield the fallback.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        let evaluation = Self::outcome(condition, ctx);
        if let Some(anomaly) = &evaluation.anomaly {
            warn!(%anomaly, condition = %condition.description, "condition fell back to {}", evaluation.value);
        }
        evaluation.value
    }

    /// Strict evaluation: anomalies are errors.
    pub fn check(condition: &Condition, ctx: &ConditionContext) -> Result<bool, ConditionError> {
        let evaluation = Self::outcome(condition, ctx);
        match evaluation.anomaly {
            Some(anomaly) => Err(anomaly),
            None => Ok(evaluation.value),
        }
    }

    /// Evaluate, returning the value together with any anomaly.
    pub fn outcome(condition: &Condition, ctx: &ConditionContext) -> Evaluation {
        let state = ctx.state;
        let op = condition.operator();

        match condition.condition_type {
            ConditionType::HasHope => Self::key(condition, HopeKind::parse)
                .map(|kind| state.hope(kind).active > 0)
                .into(),

            ConditionType::HasDiscontent => Self::key(condition, DiscontentKind::parse)
                .map(|kind| state.discontent(kind).active > 0)
                .into(),

            ConditionType::HasBuilding => Self::text(condition)
                .map(|id| state.has_building(id))
                .into(),

            ConditionType::HasLaw => Self::text(condition).map(|id| state.has_law(id)).into(),

            ConditionType::CompareHopeDiscontent => Evaluation::ok(op.compare(
                i64::try_from(state.total_active_hope()).unwrap_or(i64::MAX),
                i64::try_from(state.total_active_discontent()).unwrap_or(i64::MAX),
            )),

            ConditionType::HungerLevel => Self::number(condition)
                .map(|expected| op.compare(state.hunger, expected))
                .into(),

            ConditionType::StressLevel => Self::number(condition)
                .map(|expected| op.compare(state.stress, expected))
                .into(),

            ConditionType::ResourceAmount => {
                Self::counted(condition, |key| ResourceKind::parse(key).map(|k| state.resource(k)))
            }

            ConditionType::CitizensType => {
                Self::counted(condition, |key| CitizenKind::parse(key).map(|k| state.citizens_of(k)))
            }

            ConditionType::Custom => match ctx.eval_custom {
                Some(eval) => Evaluation::ok(eval.evaluate(condition, state)),
                None => Evaluation::fallback(
                    false,
                    ConditionError::UnhandledCustom {
                        description: condition.description.clone(),
                    },
                ),
            },
        }
    }

    /// Compare a keyed count against the numeric value.
    ///
    /// A missing or unknown key counts as zero, so the fallback is the
    /// comparison against zero rather than plain `false`.
    fn counted(condition: &Condition, lookup: impl Fn(&str) -> Option<u32>) -> Evaluation {
        let op = condition.operator();
        let expected = match Self::number(condition) {
            Ok(expected) => expected,
            Err(anomaly) => return Evaluation::fallback(false, anomaly),
        };

        let Some(key) = condition.compare_with.as_deref() else {
            return Evaluation::fallback(
                op.compare(0, expected),
                ConditionError::MissingOperand {
                    condition: condition.condition_type,
                    field: "compareWith",
                },
            );
        };

        match lookup(key) {
            Some(count) => Evaluation::ok(op.compare(i64::from(count), expected)),
            None => Evaluation::fallback(
                op.compare(0, expected),
                ConditionError::UnknownKey {
                    condition: condition.condition_type,
                    key: key.to_string(),
                },
            ),
        }
    }

    fn text(condition: &Condition) -> Result<&str, ConditionError> {
        condition
            .value
            .as_ref()
            .and_then(ConditionValue::as_text)
            .ok_or(ConditionError::MissingOperand {
                condition: condition.condition_type,
                field: "value",
            })
    }

    fn number(condition: &Condition) -> Result<i64, ConditionError> {
        condition
            .value
            .as_ref()
            .and_then(ConditionValue::as_number)
            .ok_or(ConditionError::MissingOperand {
                condition: condition.condition_type,
                field: "value",
            })
    }

    fn key<K>(condition: &Condition, parse: impl Fn(&str) -> Option<K>) -> Result<K, ConditionError> {
        let key = Self::text(condition)?;
        parse(key).ok_or_else(|| ConditionError::UnknownKey {
            condition: condition.condition_type,
            key: key.to_string(),
        })
    }
}
