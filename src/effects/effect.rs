//! Effect tree definitions.
//!
//! An effect tree is built from six node variants. Card data stores
//! them structurally (no tag field), so deserialization identifies the
//! variant by the fields present, trying them in a fixed priority:
//! Basic, Conditional, MultiConditional, Choice, ForEach, Composite.
//! A node that fits none of them is rejected. After that the enum tag
//! is authoritative.
//!
//! Every node may carry `discardAfter` / `removeAfter` lifecycle marks.
//! The resolver ignores them; see `LifecycleFlags`.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;

use super::kind::EffectKind;

fn is_false(value: &bool) -> bool {
    !*value
}

fn one() -> u32 {
    1
}

/// Leaf node: one concrete change applied by the effect handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEffect {
    #[serde(rename = "type")]
    pub kind: EffectKind,

    /// Card referenced by deck effects (`add_card_to_deck`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,

    pub description: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl BasicEffect {
    pub fn new(kind: EffectKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            card_id: None,
            description: description.into(),
            discard_after: false,
            remove_after: false,
        }
    }

    #[must_use]
    pub fn with_card_id(mut self, card_id: impl Into<String>) -> Self {
        self.card_id = Some(card_id.into());
        self
    }
}

/// If / else on a single condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalEffect {
    pub condition: Condition,
    pub if_true: Box<Effect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_false: Option<Box<Effect>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl ConditionalEffect {
    pub fn new(condition: Condition, if_true: impl Into<Effect>) -> Self {
        Self {
            condition,
            if_true: Box::new(if_true.into()),
            if_false: None,
            discard_after: false,
            remove_after: false,
        }
    }

    #[must_use]
    pub fn otherwise(mut self, if_false: impl Into<Effect>) -> Self {
        self.if_false = Some(Box::new(if_false.into()));
        self
    }
}

/// One arm of a multi-conditional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Condition,
    pub effect: Effect,
}

/// If / else-if chain: the first branch whose condition holds wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiConditionalEffect {
    pub branches: Vec<Branch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Box<Effect>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl MultiConditionalEffect {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn branch(mut self, condition: Condition, effect: impl Into<Effect>) -> Self {
        self.branches.push(Branch {
            condition,
            effect: effect.into(),
        });
        self
    }

    #[must_use]
    pub fn otherwise(mut self, default: impl Into<Effect>) -> Self {
        self.default = Some(Box::new(default.into()));
        self
    }
}

/// Player picks between `min_choices` and `max_choices` options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceEffect {
    #[serde(default)]
    pub description: String,

    #[serde(default = "one")]
    pub min_choices: u32,

    #[serde(default = "one")]
    pub max_choices: u32,

    pub options: Vec<Effect>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl ChoiceEffect {
    pub fn new(
        description: impl Into<String>,
        min_choices: u32,
        max_choices: u32,
        options: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Self {
            description: description.into(),
            min_choices,
            max_choices,
            options: options.into_iter().collect(),
            discard_after: false,
            remove_after: false,
        }
    }

    /// Choose exactly one option.
    pub fn one_of(description: impl Into<String>, options: impl IntoIterator<Item = Effect>) -> Self {
        Self::new(description, 1, 1, options)
    }
}

/// Repeat an effect once per unit of an iteration target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForEachEffect {
    /// Key into the iteration vocabulary, see `IterationTarget`.
    pub target: String,
    pub effect: Box<Effect>,
    pub description: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl ForEachEffect {
    pub fn new(target: impl Into<String>, description: impl Into<String>, effect: impl Into<Effect>) -> Self {
        Self {
            target: target.into(),
            effect: Box::new(effect.into()),
            description: description.into(),
            discard_after: false,
            remove_after: false,
        }
    }
}

/// Effects applied in sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeEffect {
    pub effects: Vec<Effect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub discard_after: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub remove_after: bool,
}

impl CompositeEffect {
    pub fn new(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self {
            effects: effects.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A node of an effect tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    untagged,
    expecting = "an effect node (basic, conditional, multi-conditional, choice, for-each or composite)"
)]
pub enum Effect {
    Basic(BasicEffect),
    Conditional(ConditionalEffect),
    MultiConditional(MultiConditionalEffect),
    Choice(ChoiceEffect),
    ForEach(ForEachEffect),
    Composite(CompositeEffect),
}

/// Which of the six node shapes an effect is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectVariant {
    Basic,
    Conditional,
    MultiConditional,
    Choice,
    ForEach,
    Composite,
}

impl EffectVariant {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Conditional => "conditional",
            Self::MultiConditional => "multi_conditional",
            Self::Choice => "choice",
            Self::ForEach => "for_each",
            Self::Composite => "composite",
        }
    }
}

/// Builder methods for lifecycle marks, shared by every node type.
pub trait LifecycleMarks: Sized {
    /// Mutable access to `(discard_after, remove_after)`.
    fn marks_mut(&mut self) -> (&mut bool, &mut bool);

    /// Mark the card for discard once this node resolves.
    #[must_use]
    fn discarding(mut self) -> Self {
        *self.marks_mut().0 = true;
        self
    }

    /// Mark the card for removal from the game once this node resolves.
    #[must_use]
    fn removing(mut self) -> Self {
        *self.marks_mut().1 = true;
        self
    }
}

macro_rules! node_impls {
    ($($node:ident => $variant:ident),+ $(,)?) => {
        $(
            impl LifecycleMarks for $node {
                fn marks_mut(&mut self) -> (&mut bool, &mut bool) {
                    (&mut self.discard_after, &mut self.remove_after)
                }
            }

            impl From<$node> for Effect {
                fn from(node: $node) -> Self {
                    Effect::$variant(node)
                }
            }
        )+
    };
}

node_impls! {
    BasicEffect => Basic,
    ConditionalEffect => Conditional,
    MultiConditionalEffect => MultiConditional,
    ChoiceEffect => Choice,
    ForEachEffect => ForEach,
    CompositeEffect => Composite,
}

impl LifecycleMarks for Effect {
    fn marks_mut(&mut self) -> (&mut bool, &mut bool) {
        match self {
            Effect::Basic(e) => e.marks_mut(),
            Effect::Conditional(e) => e.marks_mut(),
            Effect::MultiConditional(e) => e.marks_mut(),
            Effect::Choice(e) => e.marks_mut(),
            Effect::ForEach(e) => e.marks_mut(),
            Effect::Composite(e) => e.marks_mut(),
        }
    }
}

impl Effect {
    /// Create a basic effect.
    pub fn basic(kind: EffectKind, description: impl Into<String>) -> Self {
        BasicEffect::new(kind, description).into()
    }

    /// Create an effect adding a card to the deck.
    pub fn add_card(card_id: impl Into<String>, description: impl Into<String>) -> Self {
        BasicEffect::new(EffectKind::AddCardToDeck, description)
            .with_card_id(card_id)
            .into()
    }

    /// Create a sequence of effects.
    pub fn composite(effects: impl IntoIterator<Item = Effect>) -> Self {
        CompositeEffect::new(effects).into()
    }

    #[must_use]
    pub fn variant(&self) -> EffectVariant {
        match self {
            Effect::Basic(_) => EffectVariant::Basic,
            Effect::Conditional(_) => EffectVariant::Conditional,
            Effect::MultiConditional(_) => EffectVariant::MultiConditional,
            Effect::Choice(_) => EffectVariant::Choice,
            Effect::ForEach(_) => EffectVariant::ForEach,
            Effect::Composite(_) => EffectVariant::Composite,
        }
    }

    /// This node's own `discardAfter` mark.
    #[must_use]
    pub fn discard_after(&self) -> bool {
        match self {
            Effect::Basic(e) => e.discard_after,
            Effect::Conditional(e) => e.discard_after,
            Effect::MultiConditional(e) => e.discard_after,
            Effect::Choice(e) => e.discard_after,
            Effect::ForEach(e) => e.discard_after,
            Effect::Composite(e) => e.discard_after,
        }
    }

    /// This node's own `removeAfter` mark.
    #[must_use]
    pub fn remove_after(&self) -> bool {
        match self {
            Effect::Basic(e) => e.remove_after,
            Effect::Conditional(e) => e.remove_after,
            Effect::MultiConditional(e) => e.remove_after,
            Effect::Choice(e) => e.remove_after,
            Effect::ForEach(e) => e.remove_after,
            Effect::Composite(e) => e.remove_after,
        }
    }

    /// Direct children, in resolution order.
    #[must_use]
    pub fn children(&self) -> Vec<&Effect> {
        match self {
            Effect::Basic(_) => Vec::new(),
            Effect::Conditional(e) => std::iter::once(e.if_true.as_ref())
                .chain(e.if_false.as_deref())
                .collect(),
            Effect::MultiConditional(e) => e
                .branches
                .iter()
                .map(|b| &b.effect)
                .chain(e.default.as_deref())
                .collect(),
            Effect::Choice(e) => e.options.iter().collect(),
            Effect::ForEach(e) => vec![e.effect.as_ref()],
            Effect::Composite(e) => e.effects.iter().collect(),
        }
    }

    /// Visit every node of the tree, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Effect)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Ids of every card this tree may add to the deck, on any branch.
    #[must_use]
    pub fn added_card_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| {
            if let Effect::Basic(basic) = node {
                if basic.kind == EffectKind::AddCardToDeck {
                    ids.extend(basic.card_id.as_deref());
                }
            }
        });
        ids
    }
}
