//! Concrete effect kinds carried by basic effects.

use serde::{Deserialize, Serialize};

/// What a basic effect does when applied.
///
/// The engine never interprets these; `EffectHandler::apply_basic`
/// gives them meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    // === Resources and citizens ===
    GainResource,
    LoseResource,
    GainCitizen,
    LoseCitizen,
    GainSick,
    Heal,
    Treat,
    DieCitizen,
    ReuseWorker,
    ExhaustWorker,

    // === Tokens ===
    ChangeHope,
    ChangeDiscontent,
    ActivateHope,
    ActivateDiscontent,
    ExhaustHope,
    ExhaustDiscontent,

    // === Levels ===
    ChangeHunger,
    ChangeStress,

    // === City ===
    BuildBuilding,
    UpgradeBuilding,
    DestroyBuilding,
    IntroduceLaw,
    DiscardLaw,

    // === Map ===
    PlaceTile,
    MoveDevelopment,
    WorkshopEffect,
    FlipDisease,
    TakeFromMap,
    RemoveFromMap,

    // === Deck ===
    CardEffect,
    AddCardToDeck,
    RemoveCardFromDeck,
    DiscardCard,
    ShuffleCardIntoDeck,

    Custom,
}

impl EffectKind {
    /// Kinds that manipulate the deck rather than the city.
    ///
    /// The session container handles these (usually via `card_id`).
    #[must_use]
    pub const fn is_deck_manipulation(self) -> bool {
        matches!(
            self,
            Self::AddCardToDeck
                | Self::RemoveCardFromDeck
                | Self::DiscardCard
                | Self::ShuffleCardIntoDeck
        )
    }

    /// Kinds that name another card and are meaningless without `card_id`.
    #[must_use]
    pub const fn requires_card_id(self) -> bool {
        matches!(self, Self::AddCardToDeck | Self::ShuffleCardIntoDeck)
    }
}
