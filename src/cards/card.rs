//! Card records.
//!
//! A `Card` is the static data printed on a card. Only `effect_tree`
//! matters to the engine; the remaining text fields are carried for the
//! presentation layer.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::{render, Disposition, Effect, LifecycleFlags};

/// The three decks a card can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    ConsecuenciaLey,
    DisputaSocial,
    Ocaso,
}

impl CardType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConsecuenciaLey => "consecuencia_ley",
            Self::DisputaSocial => "disputa_social",
            Self::Ocaso => "ocaso",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub etiqueta: String,

    #[serde(default)]
    pub titulo: String,

    #[serde(default)]
    pub texto_ambientacion: String,

    /// Printed effect text.
    #[serde(default)]
    pub efecto: String,

    /// Structured effect, if the card has one.
    #[serde(default, alias = "efectoEstructurado", skip_serializing_if = "Option::is_none")]
    pub effect_tree: Option<Effect>,

    /// Only used by consecuencia_ley cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variante: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, card_type: CardType, titulo: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            card_type,
            etiqueta: String::new(),
            titulo: titulo.into(),
            texto_ambientacion: String::new(),
            efecto: String::new(),
            effect_tree: None,
            variante: None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<Effect>) -> Self {
        self.effect_tree = Some(effect.into());
        self
    }

    #[must_use]
    pub fn with_efecto(mut self, text: impl Into<String>) -> Self {
        self.efecto = text.into();
        self
    }

    #[must_use]
    pub fn with_variante(mut self, variante: impl Into<String>) -> Self {
        self.variante = Some(variante.into());
        self
    }

    #[must_use]
    pub fn is_disputa_social(&self) -> bool {
        self.card_type == CardType::DisputaSocial
    }

    /// Lifecycle marks anywhere in the effect tree.
    #[must_use]
    pub fn lifecycle_flags(&self) -> LifecycleFlags {
        self.effect_tree
            .as_ref()
            .map(LifecycleFlags::collect)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn disposition(&self) -> Disposition {
        self.lifecycle_flags().disposition()
    }

    /// Cards this card may add to the deck.
    #[must_use]
    pub fn added_card_ids(&self) -> Vec<&str> {
        self.effect_tree
            .as_ref()
            .map(Effect::added_card_ids)
            .unwrap_or_default()
    }

    /// Text to show for the effect: the printed text if there is one,
    /// otherwise the rendered tree.
    #[must_use]
    pub fn effect_text(&self) -> Cow<'_, str> {
        match &self.effect_tree {
            Some(tree) if self.efecto.is_empty() => Cow::Owned(render(tree, 0)),
            _ => Cow::Borrowed(&self.efecto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectKind, LifecycleMarks};

    #[test]
    fn test_deserialize_card() {
        let json = r#"{
            "id": "OC-07",
            "type": "ocaso",
            "etiqueta": "Invierno",
            "titulo": "Helada",
            "textoAmbientacion": "El frío no perdona.",
            "efecto": "Pierde 2 carbón.",
            "efectoEstructurado": {
                "type": "lose_resource",
                "description": "Pierde 2 carbón",
                "removeAfter": true
            }
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.card_type, CardType::Ocaso);
        assert_eq!(card.texto_ambientacion, "El frío no perdona.");
        assert!(card.effect_tree.is_some());
        assert_eq!(card.disposition(), Disposition::Remove);
        assert!(card.variante.is_none());
    }

    #[test]
    fn test_card_without_effect() {
        let card = Card::new("CL-01", CardType::ConsecuenciaLey, "Racionamiento")
            .with_efecto("Sin efecto")
            .with_variante("A");

        assert_eq!(card.lifecycle_flags(), LifecycleFlags::default());
        assert_eq!(card.disposition(), Disposition::Keep);
        assert!(card.added_card_ids().is_empty());
        assert_eq!(card.effect_text(), "Sin efecto");
    }

    #[test]
    fn test_effect_text_falls_back_to_render() {
        let card = Card::new("DS-02", CardType::DisputaSocial, "Huelga").with_effect(
            Effect::composite([
                Effect::basic(EffectKind::LoseResource, "Pierde 1 comida"),
                Effect::add_card("DS-03", "Añade DS-03").discarding(),
            ]),
        );

        assert!(card.is_disputa_social());
        assert_eq!(card.effect_text(), "Pierde 1 comida\nLuego: Añade DS-03");
        assert_eq!(card.added_card_ids(), ["DS-03"]);
        assert_eq!(card.disposition(), Disposition::Discard);
    }

    #[test]
    fn test_serialize_uses_effect_tree_name() {
        let card = Card::new("OC-01", CardType::Ocaso, "Niebla")
            .with_effect(Effect::basic(EffectKind::ChangeStress, "+1 estrés"));
        let json = serde_json::to_string(&card).unwrap();

        assert!(json.contains("\"effectTree\""));
        assert!(json.contains("\"type\":\"ocaso\""));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
