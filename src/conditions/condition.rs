//! Condition definitions.
//!
//! A condition is a boolean predicate over `GameState` used to pick
//! branches of conditional effects. Its `type` decides which of
//! `operator`, `value` and `compareWith` are meaningful:
//!
//! | type | value | compareWith |
//! |---|---|---|
//! | `has_hope`, `has_discontent`, `has_building`, `has_law` | key (text) | - |
//! | `compare_hope_discontent` | - | - |
//! | `hunger_level`, `stress_level` | number | - |
//! | `resource_amount`, `citizens_type` | number | key |
//! | `custom` | - | - |

use serde::{Deserialize, Serialize};

use crate::core::{CitizenKind, DiscontentKind, HopeKind, ResourceKind};

/// The fixed set of condition types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    HasHope,
    HasDiscontent,
    HasBuilding,
    HasLaw,
    CompareHopeDiscontent,
    HungerLevel,
    StressLevel,
    ResourceAmount,
    CitizensType,
    Custom,
}

impl ConditionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HasHope => "has_hope",
            Self::HasDiscontent => "has_discontent",
            Self::HasBuilding => "has_building",
            Self::HasLaw => "has_law",
            Self::CompareHopeDiscontent => "compare_hope_discontent",
            Self::HungerLevel => "hunger_level",
            Self::StressLevel => "stress_level",
            Self::ResourceAmount => "resource_amount",
            Self::CitizensType => "citizens_type",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer comparison operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    #[default]
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
}

impl ComparisonOperator {
    /// Compare `lhs` against `rhs`.
    #[must_use]
    pub const fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
            Self::GreaterThan => lhs > rhs,
            Self::LessThan => lhs < rhs,
            Self::GreaterOrEqual => lhs >= rhs,
            Self::LessOrEqual => lhs <= rhs,
        }
    }
}

/// A condition operand: either a key or a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(i64),
    Text(String),
}

impl ConditionValue {
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl From<i64> for ConditionValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A predicate over game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ComparisonOperator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,

    /// Mapping key for `resource_amount` and `citizens_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_with: Option<String>,

    /// Human-readable text, shown as the branch header.
    pub description: String,
}

impl Condition {
    /// Create a condition with no operands.
    pub fn new(condition_type: ConditionType, description: impl Into<String>) -> Self {
        Self {
            condition_type,
            operator: None,
            value: None,
            compare_with: None,
            description: description.into(),
        }
    }

    pub fn has_hope(kind: HopeKind, description: impl Into<String>) -> Self {
        Self::new(ConditionType::HasHope, description).with_value(kind.as_str())
    }

    pub fn has_discontent(kind: DiscontentKind, description: impl Into<String>) -> Self {
        Self::new(ConditionType::HasDiscontent, description).with_value(kind.as_str())
    }

    pub fn has_building(building: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ConditionType::HasBuilding, description).with_value(building.into())
    }

    pub fn has_law(law: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ConditionType::HasLaw, description).with_value(law.into())
    }

    /// Total active hope compared against total active discontent.
    pub fn hope_vs_discontent(op: ComparisonOperator, description: impl Into<String>) -> Self {
        Self::new(ConditionType::CompareHopeDiscontent, description).with_operator(op)
    }

    pub fn hunger(op: ComparisonOperator, value: i64, description: impl Into<String>) -> Self {
        Self::new(ConditionType::HungerLevel, description)
            .with_operator(op)
            .with_value(value)
    }

    pub fn stress(op: ComparisonOperator, value: i64, description: impl Into<String>) -> Self {
        Self::new(ConditionType::StressLevel, description)
            .with_operator(op)
            .with_value(value)
    }

    pub fn resource(
        kind: ResourceKind,
        op: ComparisonOperator,
        value: i64,
        description: impl Into<String>,
    ) -> Self {
        Self::new(ConditionType::ResourceAmount, description)
            .with_operator(op)
            .with_value(value)
            .with_compare_with(kind.as_str())
    }

    pub fn citizens(
        kind: CitizenKind,
        op: ComparisonOperator,
        value: i64,
        description: impl Into<String>,
    ) -> Self {
        Self::new(ConditionType::CitizensType, description)
            .with_operator(op)
            .with_value(value)
            .with_compare_with(kind.as_str())
    }

    pub fn custom(description: impl Into<String>) -> Self {
        Self::new(ConditionType::Custom, description)
    }

    #[must_use]
    pub fn with_operator(mut self, op: ComparisonOperator) -> Self {
        self.operator = Some(op);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<ConditionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_compare_with(mut self, key: impl Into<String>) -> Self {
        self.compare_with = Some(key.into());
        self
    }

    /// The operator, defaulting to `Equal`.
    #[must_use]
    pub fn operator(&self) -> ComparisonOperator {
        self.operator.unwrap_or_default()
    }
}
