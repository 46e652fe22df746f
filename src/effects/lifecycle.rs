//! Lifecycle flag aggregation.
//!
//! The presentation layer decides what happens to a card before it
//! knows which branch will run, so the scan is static: every node of
//! the tree counts, including untaken branches and unchosen options.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::effect::Effect;

/// Whether any node of a tree asks for the card to be discarded or removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleFlags {
    pub discard: bool,
    pub remove: bool,
}

/// What to do with a card once its effect has been resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Remove from the game. Irreversible within a session.
    Remove,
    /// Move to the discard pile.
    Discard,
    /// No lifecycle request.
    Keep,
}

impl LifecycleFlags {
    /// Scan every node of `effect`.
    #[must_use]
    pub fn collect(effect: &Effect) -> Self {
        let mut flags = Self::default();
        effect.walk(&mut |node| {
            flags = flags | Self::of_node(node);
        });
        flags
    }

    /// The marks on a single node, ignoring its children.
    #[must_use]
    pub fn of_node(effect: &Effect) -> Self {
        Self {
            discard: effect.discard_after(),
            remove: effect.remove_after(),
        }
    }

    /// The single action to offer. Removal wins over discard.
    #[must_use]
    pub fn disposition(self) -> Disposition {
        if self.remove {
            Disposition::Remove
        } else if self.discard {
            Disposition::Discard
        } else {
            Disposition::Keep
        }
    }
}

impl BitOr for LifecycleFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            discard: self.discard || rhs.discard,
            remove: self.remove || rhs.remove,
        }
    }
}
