//! Iteration targets for `ForEach` effects.

use crate::core::{DiscontentKind, GameState, HopeKind};

/// What a `ForEach` effect counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IterationTarget {
    /// Active tokens of one hope type.
    ActiveHope(HopeKind),
    /// Active tokens of one discontent type.
    ActiveDiscontent(DiscontentKind),
    ChildrenUsedThisRound,
    WorkersUsedThisRound,
    TotalActiveHope,
    TotalActiveDiscontent,
}

impl IterationTarget {
    /// Parse a target key as written in card data.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let target = match key {
            "justicia_activa" => Self::ActiveHope(HopeKind::Justicia),
            "cuidado_activa" => Self::ActiveHope(HopeKind::Cuidado),
            "motivacion_activa" => Self::ActiveHope(HopeKind::Motivacion),
            "codicia_activa" => Self::ActiveDiscontent(DiscontentKind::Codicia),
            "ira_activa" => Self::ActiveDiscontent(DiscontentKind::Ira),
            "apatia_activa" => Self::ActiveDiscontent(DiscontentKind::Apatia),
            "niño_usado_esta_ronda" => Self::ChildrenUsedThisRound,
            "trabajador_usado_esta_ronda" => Self::WorkersUsedThisRound,
            "esperanza_activa_total" => Self::TotalActiveHope,
            "descontento_activo_total" => Self::TotalActiveDiscontent,
            _ => return None,
        };
        Some(target)
    }

    /// Number of iterations in the given state, saturating at `u32::MAX`.
    #[must_use]
    pub fn count(self, state: &GameState) -> u32 {
        let saturate = |total: u64| u32::try_from(total).unwrap_or(u32::MAX);
        match self {
            Self::ActiveHope(kind) => state.hope(kind).active,
            Self::ActiveDiscontent(kind) => state.discontent(kind).active,
            Self::ChildrenUsedThisRound => state.round_data.ninos_usados,
            Self::WorkersUsedThisRound => state.round_data.trabajadores_usados,
            Self::TotalActiveHope => saturate(state.total_active_hope()),
            Self::TotalActiveDiscontent => saturate(state.total_active_discontent()),
        }
    }
}
