//! Card catalog integration tests.
//!
//! Loading card data from JSON, load-time validation, and the static
//! questions asked of a card before it resolves.

mod common;

use common::TableHandler;
use ocaso_effects::{
    CardCatalog, CardType, CatalogError, Disposition, EffectKind, EffectResolver, GameState,
};

const CATALOG: &str = r#"[
    {
        "id": "CL-01",
        "type": "consecuencia_ley",
        "etiqueta": "Ley",
        "titulo": "Racionamiento",
        "textoAmbientacion": "Menos para todos.",
        "efecto": "Si tienes Cuidado activa gana 1 comida.",
        "variante": "A",
        "efectoEstructurado": {
            "condition": { "type": "has_hope", "value": "cuidado", "description": "Si tienes Cuidado activa" },
            "ifTrue": { "type": "gain_resource", "description": "Gana 1 comida" }
        }
    },
    {
        "id": "DS-01",
        "type": "disputa_social",
        "titulo": "Protesta",
        "efecto": "Elige una opción.",
        "effectTree": {
            "description": "Elige uno:",
            "options": [
                { "type": "change_discontent", "description": "Gana 1 Ira", "discardAfter": true },
                {
                    "effects": [
                        { "type": "lose_resource", "description": "Pierde 2 comida" },
                        { "type": "add_card_to_deck", "cardId": "OC-02", "description": "Añade OC-02" }
                    ],
                    "removeAfter": true
                }
            ]
        }
    },
    {
        "id": "OC-01",
        "type": "ocaso",
        "titulo": "Niebla",
        "efecto": "Sin efecto."
    },
    {
        "id": "OC-02",
        "type": "ocaso",
        "titulo": "Helada",
        "effectTree": {
            "branches": [
                {
                    "condition": {
                        "type": "resource_amount",
                        "operator": "less_than",
                        "value": 2,
                        "compareWith": "carbon",
                        "description": "Si tienes menos de 2 carbón"
                    },
                    "effect": { "type": "die_citizen", "description": "Muere 1 trabajador" }
                }
            ],
            "default": { "type": "lose_resource", "description": "Pierde 2 carbón" }
        }
    }
]"#;

#[test]
fn test_load_catalog() {
    let catalog = CardCatalog::from_json_str(CATALOG).unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.of_type(CardType::Ocaso).count(), 2);
    assert_eq!(catalog.get("CL-01").unwrap().variante.as_deref(), Some("A"));
    assert!(catalog.get("OC-01").unwrap().effect_tree.is_none());
    assert!(catalog.unresolved_card_refs().is_empty());
}

/// Lifecycle marks in unchosen options still decide disposal.
#[test]
fn test_disposition_is_static() {
    let catalog = CardCatalog::from_json_str(CATALOG).unwrap();

    let protesta = catalog.get("DS-01").unwrap();
    let flags = protesta.lifecycle_flags();
    assert!(flags.discard && flags.remove);
    assert_eq!(protesta.disposition(), Disposition::Remove);
    assert_eq!(protesta.added_card_ids(), ["OC-02"]);

    assert_eq!(catalog.get("CL-01").unwrap().disposition(), Disposition::Keep);
    assert_eq!(catalog.get("OC-01").unwrap().disposition(), Disposition::Keep);
}

#[test]
fn test_rendered_text() {
    let catalog = CardCatalog::from_json_str(CATALOG).unwrap();
    let helada = catalog.get("OC-02").unwrap();

    assert_eq!(
        helada.effect_text(),
        "Si tienes menos de 2 carbón:\n  Muere 1 trabajador\nDe lo contrario:\n  Pierde 2 carbón"
    );
    assert_eq!(
        catalog.get("CL-01").unwrap().effect_text(),
        "Si tienes Cuidado activa gana 1 comida."
    );
}

#[tokio::test]
async fn test_resolve_loaded_card() {
    let catalog = CardCatalog::from_json_str(CATALOG).unwrap();
    let protesta = catalog.get("DS-01").unwrap();
    let tree = protesta.effect_tree.as_ref().unwrap();

    let mut handler = TableHandler::scripted(&[&[1]]);
    let report = EffectResolver::new()
        .resolve(tree, &mut GameState::default(), &mut handler)
        .await
        .unwrap();

    assert_eq!(handler.applied, ["Pierde 2 comida", "Añade OC-02"]);
    assert_eq!(
        handler.deck_changes,
        [(EffectKind::AddCardToDeck, Some("OC-02".to_string()))]
    );
    assert_eq!(report.basic_applied, 2);
}

#[test]
fn test_unknown_node_names_the_card() {
    let json = r#"[{
        "id": "OC-09",
        "type": "ocaso",
        "effectTree": { "type": "teleport", "description": "Viaja" }
    }]"#;

    let err = CardCatalog::from_json_str(json).unwrap_err();
    match &err {
        CatalogError::InvalidCard { card_id, path, .. } => {
            assert_eq!(card_id, "OC-09");
            assert_eq!(path.as_deref(), Some("effectTree"));
        }
        other => panic!("Expected InvalidCard, got {other:?}"),
    }
    assert!(err.to_string().contains("OC-09"));
}

#[test]
fn test_unknown_nested_node_reports_its_path() {
    let json = r#"[{
        "id": "CL-03",
        "type": "consecuencia_ley",
        "efectoEstructurado": {
            "effects": [
                { "type": "gain_resource", "description": "Gana 1 carbón" },
                {
                    "branches": [
                        {
                            "condition": { "type": "hunger_level", "value": 3, "description": "Si el hambre es 3" },
                            "effect": { "type": "riot", "description": "Motín" }
                        }
                    ]
                }
            ]
        }
    }]"#;

    let err = CardCatalog::from_json_str(json).unwrap_err();
    assert!(
        err.to_string().contains("efectoEstructurado.effects[1].branches[0].effect"),
        "{err}"
    );
}

#[test]
fn test_deep_checks_run_at_load_time() {
    let json = r#"[{
        "id": "OC-10",
        "type": "ocaso",
        "effectTree": {
            "condition": { "type": "has_hope", "description": "Si tienes esperanza" },
            "ifTrue": { "type": "shuffle_card_into_deck", "description": "Baraja una carta" }
        }
    }]"#;

    match CardCatalog::from_json_str(json).unwrap_err() {
        CatalogError::InvalidEffect { card_id, errors } => {
            assert_eq!(card_id, "OC-10");
            let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
            assert_eq!(paths, ["condition", "ifTrue"]);
        }
        other => panic!("Expected InvalidEffect, got {other:?}"),
    }
}

#[test]
fn test_invalid_tree_is_rejected() {
    let json = r#"[{
        "id": "OC-09",
        "type": "ocaso",
        "effectTree": {
            "effects": [
                { "type": "gain_resource", "description": "Gana 1 carbón" },
                { "description": "Elige:", "minChoices": 2, "maxChoices": 1, "options": [
                    { "type": "heal", "description": "Cura 1" }
                ] }
            ]
        }
    }]"#;

    let err = CardCatalog::from_json_str(json).unwrap_err();
    match &err {
        CatalogError::InvalidEffect { card_id, errors } => {
            assert_eq!(card_id, "OC-09");
            assert_eq!(errors[0].path, "effects[1]");
        }
        other => panic!("Expected InvalidEffect, got {other:?}"),
    }
    assert!(err.to_string().contains("OC-09"));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let json = r#"[
        { "id": "OC-01", "type": "ocaso", "titulo": "Niebla" },
        { "id": "OC-01", "type": "ocaso", "titulo": "Niebla otra vez" }
    ]"#;

    assert!(matches!(
        CardCatalog::from_json_str(json),
        Err(CatalogError::DuplicateId(id)) if id == "OC-01"
    ));
}
