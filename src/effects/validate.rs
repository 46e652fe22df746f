//! Structural validation of effect trees.
//!
//! [`validate`] checks a single node's shape and nothing else: basic
//! descriptions, non-empty collections, choice bounds and `ForEach`
//! targets being present. [`validate_deep`] walks the whole tree and
//! prefixes each error with the path of the node it came from
//! (`options[1].ifTrue`). Deep mode also checks what the resolver
//! would otherwise only diagnose at runtime: `ForEach` targets outside
//! the iteration vocabulary, deck effects without a card id, and
//! condition operands of the wrong shape. Catalogs use the deep form
//! to reject malformed cards at load time.

use std::fmt;

use serde::Serialize;

use crate::conditions::{Condition, ConditionType, ConditionValue};

use super::effect::Effect;
use super::target::IterationTarget;

/// One structural problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Location inside the tree; empty for the root.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            message: message.into(),
        }
    }

    fn nested(mut self, segment: &str) -> Self {
        self.path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{segment}.{}", self.path)
        };
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of validating an effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate the shape of `effect` itself, without descending.
#[must_use]
pub fn validate(effect: &Effect) -> ValidationReport {
    ValidationReport::from_errors(node_errors(effect))
}

/// Validate every node of the tree.
#[must_use]
pub fn validate_deep(effect: &Effect) -> ValidationReport {
    let mut errors = Vec::new();
    collect_deep(effect, &mut errors);
    ValidationReport::from_errors(errors)
}

fn collect_deep(effect: &Effect, errors: &mut Vec<ValidationError>) {
    errors.extend(node_errors(effect));
    errors.extend(reference_errors(effect));

    for (segment, child) in labelled_children(effect) {
        let mut child_errors = Vec::new();
        collect_deep(child, &mut child_errors);
        errors.extend(child_errors.into_iter().map(|e| e.nested(&segment)));
    }
}

fn labelled_children(effect: &Effect) -> Vec<(String, &Effect)> {
    match effect {
        Effect::Basic(_) => Vec::new(),
        Effect::Conditional(e) => std::iter::once(("ifTrue".to_string(), e.if_true.as_ref()))
            .chain(e.if_false.as_deref().map(|f| ("ifFalse".to_string(), f)))
            .collect(),
        Effect::MultiConditional(e) => e
            .branches
            .iter()
            .enumerate()
            .map(|(i, b)| (format!("branches[{i}].effect"), &b.effect))
            .chain(e.default.as_deref().map(|d| ("default".to_string(), d)))
            .collect(),
        Effect::Choice(e) => e
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| (format!("options[{i}]"), o))
            .collect(),
        Effect::ForEach(e) => vec![("effect".to_string(), e.effect.as_ref())],
        Effect::Composite(e) => e
            .effects
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("effects[{i}]"), c))
            .collect(),
    }
}

fn node_errors(effect: &Effect) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match effect {
        Effect::Basic(basic) => {
            if basic.description.trim().is_empty() {
                errors.push(ValidationError::new("basic effect has no description"));
            }
        }
        Effect::Conditional(_) => {}
        Effect::MultiConditional(multi) => {
            if multi.branches.is_empty() {
                errors.push(ValidationError::new("multi-conditional effect has no branches"));
            }
        }
        Effect::Choice(choice) => {
            if choice.options.is_empty() {
                errors.push(ValidationError::new("choice effect has no options"));
            }
            if choice.min_choices > choice.max_choices {
                errors.push(ValidationError::new(format!(
                    "minChoices ({}) is greater than maxChoices ({})",
                    choice.min_choices, choice.max_choices
                )));
            }
        }
        Effect::ForEach(for_each) => {
            if for_each.target.trim().is_empty() {
                errors.push(ValidationError::new("for-each effect has no target"));
            }
        }
        Effect::Composite(composite) => {
            if composite.effects.is_empty() {
                errors.push(ValidationError::new("composite effect has no sub-effects"));
            }
        }
    }

    errors
}

/// References a node makes that only resolve against the game's
/// vocabulary. Checked in deep mode only.
fn reference_errors(effect: &Effect) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match effect {
        Effect::Basic(basic) => {
            if basic.kind.requires_card_id() && basic.card_id.is_none() {
                errors.push(ValidationError::new(format!(
                    "{:?} effect has no card id",
                    basic.kind
                )));
            }
        }
        Effect::Conditional(cond) => {
            errors.extend(condition_errors(&cond.condition).map(|e| e.nested("condition")));
        }
        Effect::MultiConditional(multi) => {
            for (i, branch) in multi.branches.iter().enumerate() {
                let segment = format!("branches[{i}].condition");
                errors.extend(condition_errors(&branch.condition).map(|e| e.nested(&segment)));
            }
        }
        Effect::ForEach(for_each) => {
            if !for_each.target.trim().is_empty() && IterationTarget::parse(&for_each.target).is_none() {
                errors.push(ValidationError::new(format!(
                    "unknown for-each target {:?}",
                    for_each.target
                )));
            }
        }
        Effect::Choice(_) | Effect::Composite(_) => {}
    }

    errors
}

/// Operand checks matching what the evaluator needs for each type.
fn condition_errors(condition: &Condition) -> impl Iterator<Item = ValidationError> {
    let has_text = condition.value.as_ref().and_then(ConditionValue::as_text).is_some();
    let has_number = condition.value.as_ref().and_then(ConditionValue::as_number).is_some();

    let message = match condition.condition_type {
        ConditionType::HasHope
        | ConditionType::HasDiscontent
        | ConditionType::HasBuilding
        | ConditionType::HasLaw
            if !has_text =>
        {
            Some(format!("{} condition needs a text value", condition.condition_type))
        }
        ConditionType::HungerLevel | ConditionType::StressLevel if !has_number => {
            Some(format!("{} condition needs a numeric value", condition.condition_type))
        }
        ConditionType::ResourceAmount | ConditionType::CitizensType
            if !has_number || condition.compare_with.is_none() =>
        {
            Some(format!(
                "{} condition needs a numeric value and compareWith",
                condition.condition_type
            ))
        }
        _ => None,
    };

    message.map(ValidationError::new).into_iter()
}
