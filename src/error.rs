//! Error types for the effect engine.

use thiserror::Error;

use crate::conditions::ConditionType;
use crate::effects::ValidationError;

/// Failure reported by an `EffectHandler` implementation.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A condition that cannot be evaluated meaningfully.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("{condition}: unknown key {key:?}")]
    UnknownKey { condition: ConditionType, key: String },

    #[error("{condition}: missing or ill-typed `{field}`")]
    MissingOperand {
        condition: ConditionType,
        field: &'static str,
    },

    #[error("custom condition has no evaluator: {description:?}")]
    UnhandledCustom { description: String },
}

/// Errors that abort effect resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("condition could not be evaluated: {0}")]
    Condition(#[from] ConditionError),

    #[error("unknown for-each target {0:?}")]
    UnknownTarget(String),

    #[error("choice selected option {index} but only {len} options exist")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("effect tree exceeds maximum depth {max}")]
    DepthExceeded { max: u32 },

    #[error("effect handler failed: {0}")]
    Handler(#[source] HandlerError),
}

/// Errors loading a card catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("card {card_id:?} could not be read{}: {source}", at_node(.path))]
    InvalidCard {
        card_id: String,
        /// Deepest effect node that failed to parse, if the tree is at fault.
        path: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate card id {0:?}")]
    DuplicateId(String),

    #[error("card {card_id:?} has an invalid effect tree: {}", first_error(.errors))]
    InvalidEffect {
        card_id: String,
        errors: Vec<ValidationError>,
    },
}

fn first_error(errors: &[ValidationError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

fn at_node(path: &Option<String>) -> String {
    path.as_ref().map(|p| format!(" at {p}")).unwrap_or_default()
}
