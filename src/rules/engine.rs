//! The state reducer.
//!
//! `apply` maps `(definition, state, action)` to the next state. It never
//! mutates its input, so callers can keep earlier records for undo or
//! comparison.
//!
//! ## Seat and turn rules
//!
//! - `NextPlayer` wrapping back to the first seat starts a new turn
//! - `PrevPlayer` wrapping back to the last seat undoes one (floor 1)
//! - `IncTurn`/`DecTurn` move both the turn and the seat
//! - phases cycle; a game without phases ignores phase actions

use crate::core::{Action, GameDefinition, GameState, PlayerId, PlayerState, ResourceDef, ResourceKind, Scope};
use crate::error::StateError;

/// Apply `action` to `state`, returning the next state.
pub fn apply(def: &GameDefinition, state: &GameState, action: &Action) -> Result<GameState, StateError> {
    let n = state.player_count();

    let next = match action {
        Action::NextPlayer => {
            if n == 0 {
                return Ok(state.clone());
            }
            let active = state.active_player.offset(1, n);
            let turn = if active.index() == 0 { state.turn.saturating_add(1) } else { state.turn };
            GameState {
                active_player: active,
                turn,
                ..state.clone()
            }
        }
        Action::PrevPlayer => {
            if n == 0 {
                return Ok(state.clone());
            }
            let active = state.active_player.offset(-1, n);
            let turn = if active.index() == n - 1 { state.turn.saturating_sub(1).max(1) } else { state.turn };
            GameState {
                active_player: active,
                turn,
                ..state.clone()
            }
        }
        Action::SelectPlayer(player) => {
            check_seat(state, *player)?;
            GameState {
                active_player: *player,
                ..state.clone()
            }
        }
        Action::NextPhase | Action::PrevPhase => {
            let len = def.phases.len();
            if len == 0 {
                return Ok(state.clone());
            }
            let delta = if *action == Action::NextPhase { 1 } else { len - 1 };
            GameState {
                phase_index: (state.phase_index + delta) % len,
                ..state.clone()
            }
        }
        Action::IncTurn => GameState {
            active_player: state.active_player.offset(1, n),
            turn: state.turn.saturating_add(1),
            ..state.clone()
        },
        Action::DecTurn => GameState {
            active_player: state.active_player.offset(-1, n),
            turn: state.turn.saturating_sub(1).max(1),
            ..state.clone()
        },
        Action::AdjustGlobal { key, delta } => {
            let target = stored_target(def, key, Scope::Global)?;
            let current = state.global(&target.key, target.initial_value());
            state.with_global(target.key.clone(), target.clamp(current.saturating_add(*delta)))
        }
        Action::SetGlobal { key, value } => {
            let target = stored_target(def, key, Scope::Global)?;
            state.with_global(target.key.clone(), target.clamp(*value))
        }
        Action::AdjustPlayer { player, key, delta } => {
            let seat = check_seat(state, *player)?;
            let target = stored_target(def, key, Scope::PerPlayer)?;
            let current = seat.get(&target.key, target.initial_value());
            let seat = seat.with_value(target.key.clone(), target.clamp(current.saturating_add(*delta)));
            state.with_player(*player, seat)
        }
        Action::RenamePlayer { player, name } => {
            let seat = check_seat(state, *player)?;
            let seat = PlayerState {
                name: name.clone(),
                ..seat.clone()
            };
            state.with_player(*player, seat)
        }
        Action::RecolorPlayer { player, color } => {
            let seat = check_seat(state, *player)?;
            let seat = PlayerState {
                color: color.clone(),
                ..seat.clone()
            };
            state.with_player(*player, seat)
        }
        Action::Restart => GameState::fresh(def, n),
        Action::SetPlayerCount(count) => GameState::fresh(def, *count),
    };

    Ok(next)
}

fn check_seat(state: &GameState, player: PlayerId) -> Result<&PlayerState, StateError> {
    state.player(player).ok_or(StateError::UnknownPlayer(player))
}

/// Resolve the resource whose stored value an adjustment of `key` changes.
///
/// Numbers change themselves; escalators change their counter; derived
/// values are read-only.
fn stored_target<'a>(def: &'a GameDefinition, key: &str, scope: Scope) -> Result<&'a ResourceDef, StateError> {
    let res = def
        .resource(key)
        .ok_or_else(|| StateError::UnknownResource(key.to_string()))?;
    if res.scope != scope {
        return Err(StateError::ScopeMismatch {
            key: key.to_string(),
            expected: scope.as_str(),
            actual: res.scope.as_str(),
        });
    }
    match &res.kind {
        ResourceKind::Number { .. } => Ok(res),
        ResourceKind::Derived(_) => Err(StateError::ReadOnlyResource(key.to_string())),
        ResourceKind::Escalator { counter_key, .. } if *counter_key == res.key => Ok(res),
        ResourceKind::Escalator { counter_key, .. } => def
            .resource(counter_key)
            .ok_or_else(|| StateError::UnknownResource(counter_key.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk() -> GameDefinition {
        GameDefinition::from_json(
            r#"{
            "key": "risk", "name": "Risk", "minPlayers": 2, "maxPlayers": 6,
            "phases": ["Reinforcement", "Attack", "Fortify"],
            "resources": [
                { "key": "setsTurnedIn", "label": "Sets", "type": "number", "scope": "global", "min": 0, "max": 999 },
                { "key": "riskTurnIn", "label": "Next", "type": "derived", "scope": "global",
                  "derive": { "fn": "riskNextArmies", "args": ["setsTurnedIn"] } },
                { "key": "esc", "label": "Esc", "type": "escalator", "scope": "global",
                  "schedule": [4, 6, 8, 10, 12, 15], "step": 5, "counterKey": "setsTurnedIn" },
                { "key": "bonus", "label": "Bonus", "type": "escalator", "scope": "global", "schedule": [2], "step": 2 },
                { "key": "armies", "label": "Armies", "type": "number", "scope": "perPlayer", "min": 0, "max": 50 }
            ]
        }"#,
        )
        .unwrap()
    }

    fn run(def: &GameDefinition, state: &GameState, actions: &[Action]) -> GameState {
        actions
            .iter()
            .fold(state.clone(), |s, a| apply(def, &s, a).unwrap())
    }

    #[test]
    fn test_next_player_wraps_and_advances_turn() {
        let def = risk();
        let state = GameState::fresh(&def, 3);

        let s = run(&def, &state, &[Action::NextPlayer, Action::NextPlayer]);
        assert_eq!(s.active_player, PlayerId::new(2));
        assert_eq!(s.turn, 1);

        let s = apply(&def, &s, &Action::NextPlayer).unwrap();
        assert_eq!(s.active_player, PlayerId::new(0));
        assert_eq!(s.turn, 2);
    }

    #[test]
    fn test_prev_player_wraps_and_floors_turn() {
        let def = risk();
        let state = GameState::fresh(&def, 3);

        let s = apply(&def, &state, &Action::PrevPlayer).unwrap();
        assert_eq!(s.active_player, PlayerId::new(2));
        assert_eq!(s.turn, 1);

        let s = run(&def, &state, &[Action::NextPlayer, Action::NextPlayer, Action::NextPlayer, Action::PrevPlayer]);
        assert_eq!(s.active_player, PlayerId::new(2));
        assert_eq!(s.turn, 1);
    }

    #[test]
    fn test_phase_cycles() {
        let def = risk();
        let state = GameState::fresh(&def, 2);

        let s = apply(&def, &state, &Action::PrevPhase).unwrap();
        assert_eq!(s.phase_index, 2);
        let s = run(&def, &s, &[Action::NextPhase, Action::NextPhase]);
        assert_eq!(s.phase_index, 1);
    }

    #[test]
    fn test_phase_noop_without_phases() {
        let mut def = risk();
        def.phases.clear();
        let state = GameState::fresh(&def, 2);
        assert_eq!(apply(&def, &state, &Action::NextPhase).unwrap(), state);
    }

    #[test]
    fn test_turn_adjust_moves_seat() {
        let def = risk();
        let state = GameState::fresh(&def, 2);

        let s = apply(&def, &state, &Action::IncTurn).unwrap();
        assert_eq!((s.turn, s.active_player), (2, PlayerId::new(1)));

        let s = run(&def, &state, &[Action::DecTurn, Action::DecTurn]);
        assert_eq!(s.turn, 1);
        assert_eq!(s.active_player, PlayerId::new(0));
    }

    #[test]
    fn test_select_player() {
        let def = risk();
        let state = GameState::fresh(&def, 2);

        let s = apply(&def, &state, &Action::SelectPlayer(PlayerId::new(1))).unwrap();
        assert_eq!(s.active_player, PlayerId::new(1));

        let err = apply(&def, &state, &Action::SelectPlayer(PlayerId::new(5))).unwrap_err();
        assert_eq!(err, StateError::UnknownPlayer(PlayerId::new(5)));
    }

    #[test]
    fn test_adjust_global_clamps() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let down = Action::AdjustGlobal {
            key: "setsTurnedIn".into(),
            delta: -1,
        };
        assert_eq!(apply(&def, &state, &down).unwrap().global("setsTurnedIn", -1), 0);

        let set = Action::SetGlobal {
            key: "setsTurnedIn".into(),
            value: 5000,
        };
        assert_eq!(apply(&def, &state, &set).unwrap().global("setsTurnedIn", -1), 999);
    }

    #[test]
    fn test_adjusting_escalator_moves_its_counter() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let esc = def.resource("esc").unwrap();

        let bump = Action::AdjustGlobal {
            key: "esc".into(),
            delta: 3,
        };
        let s = apply(&def, &state, &bump).unwrap();
        assert_eq!(s.global("setsTurnedIn", 0), 3);
        assert_eq!(s.escalation(esc, PlayerId::new(0)).unwrap().next, 10);
        assert_eq!(s.value(def.resource("riskTurnIn").unwrap(), PlayerId::new(0)), 10);
    }

    #[test]
    fn test_owned_escalator_counter_floors_at_zero() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let down = Action::AdjustGlobal {
            key: "bonus".into(),
            delta: -4,
        };
        assert_eq!(apply(&def, &state, &down).unwrap().global("bonus", -1), 0);
    }

    #[test]
    fn test_derived_is_read_only() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let err = apply(
            &def,
            &state,
            &Action::AdjustGlobal {
                key: "riskTurnIn".into(),
                delta: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err, StateError::ReadOnlyResource("riskTurnIn".into()));
    }

    #[test]
    fn test_scope_and_unknown_errors() {
        let def = risk();
        let state = GameState::fresh(&def, 2);

        let err = apply(
            &def,
            &state,
            &Action::AdjustGlobal {
                key: "armies".into(),
                delta: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, StateError::ScopeMismatch { expected: "global", actual: "perPlayer", .. }));

        let err = apply(
            &def,
            &state,
            &Action::AdjustGlobal {
                key: "gold".into(),
                delta: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err, StateError::UnknownResource("gold".into()));
    }

    #[test]
    fn test_adjust_player() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let p1 = PlayerId::new(1);

        let s = apply(
            &def,
            &state,
            &Action::AdjustPlayer {
                player: p1,
                key: "armies".into(),
                delta: 60,
            },
        )
        .unwrap();
        assert_eq!(s.player(p1).unwrap().get("armies", 0), 50);
        assert_eq!(s.player(PlayerId::new(0)).unwrap().get("armies", -1), 0);
        assert_eq!(state.player(p1).unwrap().get("armies", -1), 0);
    }

    #[test]
    fn test_rename_and_recolor() {
        let def = risk();
        let state = GameState::fresh(&def, 2);
        let s = run(
            &def,
            &state,
            &[
                Action::RenamePlayer {
                    player: PlayerId::new(0),
                    name: "Ada".into(),
                },
                Action::RecolorPlayer {
                    player: PlayerId::new(0),
                    color: "#000000".into(),
                },
            ],
        );
        assert_eq!(s.players[0].name, "Ada");
        assert_eq!(s.players[0].color, "#000000");
    }

    #[test]
    fn test_restart_and_player_count() {
        let def = risk();
        let state = GameState::fresh(&def, 4);
        let busy = run(&def, &state, &[Action::NextPlayer, Action::NextPhase, Action::IncTurn]);

        let s = apply(&def, &busy, &Action::Restart).unwrap();
        assert_eq!(s, GameState::fresh(&def, 4));

        let s = apply(&def, &busy, &Action::SetPlayerCount(10)).unwrap();
        assert_eq!(s.player_count(), 6);
        let s = apply(&def, &busy, &Action::SetPlayerCount(0)).unwrap();
        assert_eq!(s.player_count(), 2);
    }
}
