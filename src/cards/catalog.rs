//! Card catalog for lookup by id and type.
//!
//! The `CardCatalog` stores every card of a game in load order. Loading
//! from JSON validates each effect tree, so a malformed card is
//! rejected up front instead of failing mid-game.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::effects::{validate_deep, Effect};
use crate::error::CatalogError;

use super::card::{Card, CardType};

/// Catalog of cards.
///
/// ## Example
///
/// ```
/// use ocaso_effects::cards::{Card, CardCatalog, CardType};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::new("OC-01", CardType::Ocaso, "Niebla")).unwrap();
///
/// let found = catalog.get("OC-01").unwrap();
/// assert_eq!(found.titulo, "Niebla");
/// assert!(catalog.register(Card::new("OC-01", CardType::Ocaso, "Otra")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of cards and validate every effect tree.
    ///
    /// A card that fails to parse is reported by id, together with the
    /// path of the effect node at fault.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (index, value) in values.iter().enumerate() {
            catalog.register(parse_card(index, value)?)?;
        }
        catalog.validate_all()?;

        for (card_id, missing) in catalog.unresolved_card_refs() {
            warn!(card_id, missing, "card adds a card that is not in the catalog");
        }
        debug!(cards = catalog.len(), "card catalog loaded");
        Ok(catalog)
    }

    /// Register a card.
    ///
    /// The effect tree is not validated here; see `validate_all`.
    pub fn register(&mut self, card: Card) -> Result<(), CatalogError> {
        if self.index.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Check every effect tree, failing on the first invalid card.
    pub fn validate_all(&self) -> Result<(), CatalogError> {
        for card in &self.cards {
            let Some(tree) = &card.effect_tree else {
                continue;
            };
            let report = validate_deep(tree);
            if !report.valid {
                return Err(CatalogError::InvalidEffect {
                    card_id: card.id.clone(),
                    errors: report.errors,
                });
            }
        }
        Ok(())
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards of one type, in load order.
    pub fn of_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }

    /// `(card, missing)` pairs for add-to-deck effects naming unknown cards.
    #[must_use]
    pub fn unresolved_card_refs(&self) -> Vec<(&str, &str)> {
        self.cards
            .iter()
            .flat_map(|card| {
                card.added_card_ids()
                    .into_iter()
                    .filter(|id| !self.contains(id))
                    .map(move |missing| (card.id.as_str(), missing))
            })
            .collect()
    }
}

fn parse_card(index: usize, value: &Value) -> Result<Card, CatalogError> {
    Card::deserialize(value).map_err(|source| {
        let card_id = value
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("#{index}"), str::to_string);
        let path = ["effectTree", "efectoEstructurado"].into_iter().find_map(|key| {
            let tree = value.get(key)?;
            Effect::deserialize(tree)
                .is_err()
                .then(|| bad_node_path(tree, key.to_string()))
        });
        CatalogError::InvalidCard {
            card_id,
            path,
            source,
        }
    })
}

/// Descend into the first child that fails to parse. Effect nodes are
/// untagged, so a bad leaf only surfaces as a failure of its root.
fn bad_node_path(node: &Value, path: String) -> String {
    for (segment, child) in child_nodes(node) {
        if Effect::deserialize(child).is_err() {
            return bad_node_path(child, format!("{path}.{segment}"));
        }
    }
    path
}

fn child_nodes(node: &Value) -> Vec<(String, &Value)> {
    let mut children = Vec::new();
    for key in ["ifTrue", "ifFalse", "default", "effect"] {
        if let Some(child) = node.get(key) {
            children.push((key.to_string(), child));
        }
    }
    if let Some(branches) = node.get("branches").and_then(Value::as_array) {
        for (i, branch) in branches.iter().enumerate() {
            if let Some(child) = branch.get("effect") {
                children.push((format!("branches[{i}].effect"), child));
            }
        }
    }
    for key in ["options", "effects"] {
        if let Some(items) = node.get(key).and_then(Value::as_array) {
            for (i, child) in items.iter().enumerate() {
                children.push((format!("{key}[{i}]"), child));
            }
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ChoiceEffect, Effect, EffectKind};

    fn ocaso(id: &str) -> Card {
        Card::new(id, CardType::Ocaso, id)
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog.register(ocaso("OC-01")).unwrap();
        catalog
            .register(Card::new("DS-01", CardType::DisputaSocial, "Protesta"))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("DS-01"));
        assert!(catalog.get("XX-99").is_none());
        assert_eq!(catalog.get("DS-01").unwrap().titulo, "Protesta");
    }

    #[test]
    fn test_duplicate_id() {
        let mut catalog = CardCatalog::new();
        catalog.register(ocaso("OC-01")).unwrap();

        let err = catalog.register(ocaso("OC-01")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "OC-01"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_of_type_keeps_load_order() {
        let mut catalog = CardCatalog::new();
        for id in ["OC-03", "DS-01", "OC-01", "OC-02"] {
            let card_type = if id.starts_with("DS") {
                CardType::DisputaSocial
            } else {
                CardType::Ocaso
            };
            catalog.register(Card::new(id, card_type, id)).unwrap();
        }

        let ids: Vec<_> = catalog.of_type(CardType::Ocaso).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["OC-03", "OC-01", "OC-02"]);
        assert_eq!(catalog.of_type(CardType::ConsecuenciaLey).count(), 0);
    }

    #[test]
    fn test_validate_all_rejects_bad_tree() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(ocaso("OC-01").with_effect(ChoiceEffect::new(
                "Elige:",
                2,
                1,
                [Effect::basic(EffectKind::Heal, "Cura 1")],
            )))
            .unwrap();

        let err = catalog.validate_all().unwrap_err();
        match err {
            CatalogError::InvalidEffect { card_id, errors } => {
                assert_eq!(card_id, "OC-01");
                assert_eq!(errors.len(), 1);
            }
            other => panic!("Expected InvalidEffect, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_failure_names_card_and_node() {
        let json = r#"[
            { "id": "OC-01", "type": "ocaso", "titulo": "Niebla" },
            {
                "id": "DS-04",
                "type": "disputa_social",
                "effectTree": {
                    "description": "Elige uno:",
                    "options": [
                        { "type": "heal", "description": "Cura 1" },
                        {
                            "condition": { "type": "has_law", "value": "toque_de_queda", "description": "Si hay toque de queda" },
                            "ifTrue": { "type": "banish_mayor", "description": "Destierra al alcalde" }
                        }
                    ]
                }
            }
        ]"#;

        let err = CardCatalog::from_json_str(json).unwrap_err();
        match &err {
            CatalogError::InvalidCard { card_id, path, .. } => {
                assert_eq!(card_id, "DS-04");
                assert_eq!(path.as_deref(), Some("effectTree.options[1].ifTrue"));
            }
            other => panic!("Expected InvalidCard, got {other:?}"),
        }
        assert!(err.to_string().contains("DS-04"));
    }

    #[test]
    fn test_parse_failure_outside_tree() {
        let json = r#"[{ "id": "OC-01", "type": "leyenda" }]"#;

        match CardCatalog::from_json_str(json).unwrap_err() {
            CatalogError::InvalidCard { card_id, path, .. } => {
                assert_eq!(card_id, "OC-01");
                assert_eq!(path, None);
            }
            other => panic!("Expected InvalidCard, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = CardCatalog::from_json_str("[{ \"id\": ").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)), "{err}");
    }

    #[test]
    fn test_unresolved_card_refs() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(ocaso("OC-01").with_effect(Effect::composite([
                Effect::add_card("DS-01", "Añade DS-01"),
                Effect::add_card("DS-09", "Añade DS-09"),
            ])))
            .unwrap();
        catalog
            .register(Card::new("DS-01", CardType::DisputaSocial, "Protesta"))
            .unwrap();

        assert_eq!(catalog.unresolved_card_refs(), [("OC-01", "DS-09")]);
    }
}
