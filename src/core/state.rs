//! Game state record.
//!
//! ## GameState
//!
//! Everything the tracker remembers about a game in progress:
//! - Turn number, phase index, active seat
//! - Global resource values
//! - Per-seat names, colors and resource values
//!
//! The record is immutable per update: actions produce a new `GameState`
//! (see `rules::apply`). `im` persistent collections make that O(1) to
//! clone and leave earlier records untouched.
//!
//! Only stored values live here. Derived values and escalator rewards are
//! computed on read from the definition plus these values.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::config::{GameDefinition, ResourceDef, ResourceKind, Scope};
use super::player::{PlayerId, PlayerState};
use crate::escalation::Escalation;

/// Immutable-per-update game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Turn number (starts at 1).
    #[serde(default = "first_turn")]
    pub turn: u32,

    /// Index into the definition's phase list.
    #[serde(default)]
    pub phase_index: usize,

    /// Seat whose turn it is.
    #[serde(default)]
    pub active_player: PlayerId,

    /// Global resource values by key.
    #[serde(default)]
    pub globals: OrdMap<String, i64>,

    /// Seats in table order.
    #[serde(default)]
    pub players: Vector<PlayerState>,
}

fn first_turn() -> u32 {
    1
}

impl GameState {
    /// Fresh state for `def` with `desired_players` seats, clamped into the
    /// game's player range.
    ///
    /// ## Defaults
    ///
    /// - `turn`: 1
    /// - `phase_index`: 0
    /// - `active_player`: seat 0
    /// - stored resources at their `initial_value()`
    #[must_use]
    pub fn fresh(def: &GameDefinition, desired_players: usize) -> Self {
        let count = def.clamp_player_count(desired_players);
        let label = def.seat_label();

        let mut globals = OrdMap::new();
        for res in def.stored_in(Scope::Global) {
            globals.insert(res.key.clone(), res.initial_value());
        }

        let mut seat_values = OrdMap::new();
        for res in def.stored_in(Scope::PerPlayer) {
            seat_values.insert(res.key.clone(), res.initial_value());
        }

        let players = PlayerId::all(count)
            .map(|seat| PlayerState {
                resources: seat_values.clone(),
                ..PlayerState::seated(seat, label)
            })
            .collect();

        Self {
            turn: 1,
            phase_index: 0,
            active_player: PlayerId::new(0),
            globals,
            players,
        }
    }

    /// Bring a loaded (possibly stale or partial) state in line with `def`.
    ///
    /// - seat count becomes `desired_players` (or the current count),
    ///   clamped into the game's range; new seats get defaults
    /// - missing stored values are filled, unknown keys dropped, values
    ///   clamped into bounds
    /// - active seat, phase index and turn are pulled back into range
    #[must_use]
    pub fn reconcile(&self, def: &GameDefinition, desired_players: Option<usize>) -> Self {
        let count = def.clamp_player_count(desired_players.unwrap_or(self.players.len()));
        let label = def.seat_label();

        let globals = reconcile_values(&self.globals, def.stored_in(Scope::Global));

        let players = PlayerId::all(count)
            .map(|seat| {
                let base = self
                    .players
                    .get(seat.index())
                    .cloned()
                    .unwrap_or_else(|| PlayerState::seated(seat, label));
                let fallback = PlayerState::seated(seat, label);
                PlayerState {
                    name: if base.name.is_empty() { fallback.name } else { base.name },
                    color: if base.color.is_empty() { fallback.color } else { base.color },
                    resources: reconcile_values(&base.resources, def.stored_in(Scope::PerPlayer)),
                }
            })
            .collect();

        let active_player = if self.active_player.index() < count {
            self.active_player
        } else {
            PlayerId::new(0)
        };
        let phase_index = if self.phase_index < def.phases.len() { self.phase_index } else { 0 };

        Self {
            turn: self.turn.max(1),
            phase_index,
            active_player,
            globals,
            players,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// Get a seat.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player.index())
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn active(&self) -> Option<&PlayerState> {
        self.player(self.active_player)
    }

    /// Get a global value with default.
    #[must_use]
    pub fn global(&self, key: &str, default: i64) -> i64 {
        self.globals.get(key).copied().unwrap_or(default)
    }

    /// Stored value of `key` in `scope`. `player` is used for per-player
    /// scope and ignored otherwise. Missing values read as 0.
    #[must_use]
    pub fn stored(&self, scope: Scope, player: PlayerId, key: &str) -> i64 {
        match scope {
            Scope::Global => self.global(key, 0),
            Scope::PerPlayer => self.player(player).map_or(0, |p| p.get(key, 0)),
        }
    }

    /// Current value of a number or derived resource. For escalators this
    /// is the counter value.
    #[must_use]
    pub fn value(&self, res: &ResourceDef, player: PlayerId) -> i64 {
        match &res.kind {
            ResourceKind::Number { .. } => self.stored(res.scope, player, &res.key),
            ResourceKind::Derived(d) => d.evaluate(|k| self.stored(res.scope, player, k)),
            ResourceKind::Escalator { counter_key, .. } => self.stored(res.scope, player, counter_key),
        }
    }

    /// `(last, next)` of an escalator resource. `None` for other kinds.
    #[must_use]
    pub fn escalation(&self, res: &ResourceDef, player: PlayerId) -> Option<Escalation> {
        match &res.kind {
            ResourceKind::Escalator { rule, counter_key } => Some(rule.at(self.stored(res.scope, player, counter_key))),
            _ => None,
        }
    }

    /// Copy with a global value replaced.
    #[must_use]
    pub fn with_global(&self, key: impl Into<String>, value: i64) -> Self {
        Self {
            globals: self.globals.update(key.into(), value),
            ..self.clone()
        }
    }

    /// Copy with a seat replaced. Out-of-range seats leave the state as is.
    #[must_use]
    pub fn with_player(&self, player: PlayerId, seat: PlayerState) -> Self {
        if player.index() >= self.players.len() {
            return self.clone();
        }
        Self {
            players: self.players.update(player.index(), seat),
            ..self.clone()
        }
    }
}

fn reconcile_values<'a>(current: &OrdMap<String, i64>, stored: impl Iterator<Item = &'a ResourceDef>) -> OrdMap<String, i64> {
    stored
        .map(|res| {
            let value = current.get(&res.key).copied().unwrap_or_else(|| res.initial_value());
            (res.key.clone(), res.clamp(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> GameDefinition {
        GameDefinition::from_json(
            r#"{
            "key": "dune", "name": "Dune", "minPlayers": 2, "maxPlayers": 2,
            "phases": ["Round Start", "Action Phase", "Refresh"],
            "resources": [
                { "key": "round", "label": "Round", "type": "number", "scope": "global", "min": 1, "max": 12 },
                { "key": "spice", "label": "Spice", "type": "number", "scope": "perPlayer", "min": 0, "max": 50 },
                { "key": "bribes", "label": "Bribes", "type": "escalator", "scope": "perPlayer", "schedule": [1, 2], "step": 3 }
            ],
            "players": { "fields": [ { "key": "name", "label": "Faction", "type": "text" } ] }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_defaults() {
        let state = GameState::fresh(&dune(), 5);

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase_index, 0);
        assert_eq!(state.active_player, PlayerId::new(0));
        assert_eq!(state.global("round", 0), 1);
        assert_eq!(state.players[0].name, "Faction 1");
        assert_eq!(state.players[1].name, "Faction 2");
        assert_eq!(state.players[1].get("spice", -1), 0);
        assert_eq!(state.players[1].get("bribes", -1), 0);
    }

    #[test]
    fn test_escalation_reads_counter() {
        let def = dune();
        let state = GameState::fresh(&def, 2);
        let bribes = def.resource("bribes").unwrap();
        let p1 = PlayerId::new(1);

        let seat = state.players[1].with_value("bribes", 3);
        let state = state.with_player(p1, seat);

        let esc = state.escalation(bribes, p1).unwrap();
        assert_eq!(esc.last, Some(5));
        assert_eq!(esc.next, 8);
        assert_eq!(state.value(bribes, p1), 3);
        assert!(state.escalation(bribes, PlayerId::new(0)).unwrap().last.is_none());
        assert!(state.escalation(def.resource("round").unwrap(), p1).is_none());
    }

    #[test]
    fn test_updates_leave_original_untouched() {
        let state = GameState::fresh(&dune(), 2);
        let next = state.with_global("round", 4);

        assert_eq!(state.global("round", 0), 1);
        assert_eq!(next.global("round", 0), 4);

        let unchanged = state.with_player(PlayerId::new(9), PlayerState::new("x", "y"));
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_reconcile_repairs_partial_state() {
        let def = dune();
        let loaded: GameState = serde_json::from_str(
            r#"{ "turn": 0, "phaseIndex": 9, "activePlayer": 4,
                 "globals": { "round": 40, "stale": 3 },
                 "players": [ { "name": "Atreides", "resources": { "spice": -5 } } ] }"#,
        )
        .unwrap();

        let fixed = loaded.reconcile(&def, None);

        assert_eq!(fixed.turn, 1);
        assert_eq!(fixed.phase_index, 0);
        assert_eq!(fixed.active_player, PlayerId::new(0));
        assert_eq!(fixed.global("round", 0), 12);
        assert!(!fixed.globals.contains_key("stale"));
        assert_eq!(fixed.player_count(), 2);
        assert_eq!(fixed.players[0].name, "Atreides");
        assert_eq!(fixed.players[0].color, "#5BC0EB");
        assert_eq!(fixed.players[0].get("spice", -1), 0);
        assert_eq!(fixed.players[1].name, "Faction 2");
    }

    #[test]
    fn test_reconcile_is_identity_on_fresh() {
        let def = dune();
        let state = GameState::fresh(&def, 2);
        assert_eq!(state.reconcile(&def, None), state);
    }

    #[test]
    fn test_serialization_shape() {
        let def = dune();
        let state = GameState::fresh(&def, 2);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["turn"], 1);
        assert_eq!(json["phaseIndex"], 0);
        assert_eq!(json["activePlayer"], 0);
        assert_eq!(json["globals"]["round"], 1);
        assert_eq!(json["players"][1]["resources"]["spice"], 0);

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
