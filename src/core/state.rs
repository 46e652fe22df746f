//! Game state read by conditions and written by basic effects.
//!
//! ## GameState
//!
//! A scratch aggregate owned by the caller of the resolver:
//! - Hope and discontent tokens (active / exhausted per type)
//! - Resource stockpiles and citizen counts
//! - Hunger and stress levels
//! - Constructed buildings and active laws
//! - Per-round counters
//!
//! The resolver only ever reads it; mutation happens inside
//! `EffectHandler::apply_basic`. Counts are unsigned, so negative
//! totals are unrepresentable rather than checked.
//!
//! Buildings and laws use `im` persistent sets so a state can be
//! cloned cheaply to replay a resolution from a snapshot.

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::keys::{CitizenKind, DiscontentKind, HopeKind, ResourceKind};

/// Active and exhausted counts for one token type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub active: u32,
    pub exhausted: u32,
}

impl TokenCount {
    #[must_use]
    pub const fn new(active: u32, exhausted: u32) -> Self {
        Self { active, exhausted }
    }

    /// Tokens in play, regardless of side.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.active.saturating_add(self.exhausted)
    }
}

/// Counters that reset at the end of every round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundData {
    /// Children put to work this round.
    pub ninos_usados: u32,
    /// Workers put to work this round.
    pub trabajadores_usados: u32,
}

/// Complete state visible to the effect engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub hope_tokens: FxHashMap<HopeKind, TokenCount>,
    pub discontent_tokens: FxHashMap<DiscontentKind, TokenCount>,
    pub resources: FxHashMap<ResourceKind, u32>,
    pub citizens: FxHashMap<CitizenKind, u32>,
    pub hunger: i64,
    pub stress: i64,
    pub buildings: ImHashSet<String>,
    pub laws: ImHashSet<String>,
    pub round_data: RoundData,
}

impl GameState {
    /// Create an empty state: no tokens, resources, citizens or buildings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Tokens ===

    #[must_use]
    pub fn hope(&self, kind: HopeKind) -> TokenCount {
        self.hope_tokens.get(&kind).copied().unwrap_or_default()
    }

    pub fn hope_mut(&mut self, kind: HopeKind) -> &mut TokenCount {
        self.hope_tokens.entry(kind).or_default()
    }

    pub fn set_hope(&mut self, kind: HopeKind, count: TokenCount) {
        self.hope_tokens.insert(kind, count);
    }

    #[must_use]
    pub fn discontent(&self, kind: DiscontentKind) -> TokenCount {
        self.discontent_tokens.get(&kind).copied().unwrap_or_default()
    }

    pub fn discontent_mut(&mut self, kind: DiscontentKind) -> &mut TokenCount {
        self.discontent_tokens.entry(kind).or_default()
    }

    pub fn set_discontent(&mut self, kind: DiscontentKind, count: TokenCount) {
        self.discontent_tokens.insert(kind, count);
    }

    /// Sum of active hope tokens over every type.
    #[must_use]
    pub fn total_active_hope(&self) -> u64 {
        self.hope_tokens.values().map(|t| u64::from(t.active)).sum()
    }

    /// Sum of active discontent tokens over every type.
    #[must_use]
    pub fn total_active_discontent(&self) -> u64 {
        self.discontent_tokens.values().map(|t| u64::from(t.active)).sum()
    }

    // === Resources and citizens ===

    #[must_use]
    pub fn resource(&self, kind: ResourceKind) -> u32 {
        self.resources.get(&kind).copied().unwrap_or(0)
    }

    pub fn set_resource(&mut self, kind: ResourceKind, amount: u32) {
        self.resources.insert(kind, amount);
    }

    /// Add a signed delta to a resource, clamping at zero.
    pub fn modify_resource(&mut self, kind: ResourceKind, delta: i64) {
        let amount = self.resources.entry(kind).or_insert(0);
        *amount = clamp_add(*amount, delta);
    }

    #[must_use]
    pub fn citizens_of(&self, kind: CitizenKind) -> u32 {
        self.citizens.get(&kind).copied().unwrap_or(0)
    }

    pub fn set_citizens(&mut self, kind: CitizenKind, amount: u32) {
        self.citizens.insert(kind, amount);
    }

    /// Add a signed delta to a citizen count, clamping at zero.
    pub fn modify_citizens(&mut self, kind: CitizenKind, delta: i64) {
        let amount = self.citizens.entry(kind).or_insert(0);
        *amount = clamp_add(*amount, delta);
    }

    // === Buildings and laws ===

    #[must_use]
    pub fn has_building(&self, id: &str) -> bool {
        self.buildings.contains(id)
    }

    pub fn add_building(&mut self, id: impl Into<String>) {
        self.buildings.insert(id.into());
    }

    /// Returns true if the building was present.
    pub fn remove_building(&mut self, id: &str) -> bool {
        self.buildings.remove(id).is_some()
    }

    #[must_use]
    pub fn has_law(&self, id: &str) -> bool {
        self.laws.contains(id)
    }

    pub fn enact_law(&mut self, id: impl Into<String>) {
        self.laws.insert(id.into());
    }

    /// Returns true if the law was active.
    pub fn repeal_law(&mut self, id: &str) -> bool {
        self.laws.remove(id).is_some()
    }

    // === Round ===

    /// Clear per-round counters.
    pub fn reset_round(&mut self) {
        self.round_data = RoundData::default();
    }
}

fn clamp_add(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new();

        assert_eq!(state.hope(HopeKind::Justicia), TokenCount::default());
        assert_eq!(state.resource(ResourceKind::Carbon), 0);
        assert_eq!(state.citizens_of(CitizenKind::Ninos), 0);
        assert_eq!(state.total_active_hope(), 0);
        assert!(!state.has_building("refugio_infantil"));
    }

    #[test]
    fn test_token_totals() {
        let mut state = GameState::new();
        state.set_hope(HopeKind::Justicia, TokenCount::new(2, 1));
        state.hope_mut(HopeKind::Cuidado).active += 3;
        state.set_discontent(DiscontentKind::Ira, TokenCount::new(1, 4));

        assert_eq!(state.total_active_hope(), 5);
        assert_eq!(state.total_active_discontent(), 1);
        assert_eq!(state.discontent(DiscontentKind::Ira).total(), 5);
    }

    #[test]
    fn test_totals_do_not_overflow() {
        let mut state = GameState::new();
        state.set_hope(HopeKind::Justicia, TokenCount::new(u32::MAX, 0));
        state.set_hope(HopeKind::Cuidado, TokenCount::new(1, 0));

        assert_eq!(state.total_active_hope(), u64::from(u32::MAX) + 1);
        assert_eq!(TokenCount::new(u32::MAX, 3).total(), u32::MAX);
    }

    #[test]
    fn test_modify_clamps_at_zero() {
        let mut state = GameState::new();
        state.set_resource(ResourceKind::Comida, 2);

        state.modify_resource(ResourceKind::Comida, -5);
        assert_eq!(state.resource(ResourceKind::Comida), 0);

        state.modify_citizens(CitizenKind::Trabajadores, 4);
        state.modify_citizens(CitizenKind::Trabajadores, -1);
        assert_eq!(state.citizens_of(CitizenKind::Trabajadores), 3);
    }

    #[test]
    fn test_buildings_and_laws() {
        let mut state = GameState::new();
        state.add_building("taller");
        state.enact_law("horas_extra");

        assert!(state.has_building("taller"));
        assert!(state.has_law("horas_extra"));
        assert!(state.repeal_law("horas_extra"));
        assert!(!state.repeal_law("horas_extra"));
        assert!(state.remove_building("taller"));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = GameState::new();
        state.add_building("taller");

        let snapshot = state.clone();
        state.add_building("enfermeria");

        assert!(!snapshot.has_building("enfermeria"));
        assert!(state.has_building("enfermeria"));
    }

    #[test]
    fn test_reset_round() {
        let mut state = GameState::new();
        state.round_data.ninos_usados = 2;

        state.reset_round();

        assert_eq!(state.round_data, RoundData::default());
    }

    #[test]
    fn test_state_serde() {
        let mut state = GameState::new();
        state.set_hope(HopeKind::Motivacion, TokenCount::new(1, 0));
        state.set_citizens(CitizenKind::IngenierosEnfermos, 2);
        state.hunger = 3;
        state.enact_law("racionamiento");

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
