//! Plain-text presentation of a game in progress.
//!
//! `GameView::build` turns a definition and a state into display rows. It
//! reads only; rendering is left to `Display` (used by the CLI) or to any
//! other front end that walks the rows.

use std::fmt;

use crate::core::{GameDefinition, GameState, PlayerId, ResourceDef, ResourceKind, Scope};
use crate::trackers::Tracker;

/// Shown where a value does not exist yet.
pub const NONE_MARK: &str = "—";

/// One display row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Resource label.
    pub label: String,
    /// Resource kind name (`number`, `derived`, `escalator`).
    pub kind: &'static str,
    /// Rendered value.
    pub value: String,
    /// Secondary note ("Based on setsTurnedIn", "Counter: setsTurnedIn").
    pub note: Option<String>,
}

impl Row {
    fn for_resource(res: &ResourceDef, state: &GameState, player: PlayerId) -> Self {
        let (value, note) = match &res.kind {
            ResourceKind::Number { .. } => (state.value(res, player).to_string(), None),
            ResourceKind::Derived(d) => {
                let inputs = d.inputs();
                let note = if inputs.is_empty() {
                    "Based on state".to_string()
                } else {
                    format!("Based on {}", inputs.join(", "))
                };
                (state.value(res, player).to_string(), Some(note))
            }
            ResourceKind::Escalator { counter_key, .. } => {
                let value = state
                    .escalation(res, player)
                    .map_or_else(|| NONE_MARK.to_string(), |e| e.to_string());
                (value, Some(format!("Counter: {}", counter_key)))
            }
        };
        Self {
            label: res.label.clone(),
            kind: res.kind.type_name(),
            value,
            note,
        }
    }

    /// Row for a custom tracker.
    #[must_use]
    pub fn for_tracker(tracker: &Tracker) -> Self {
        let esc = tracker.escalation();
        Self {
            label: tracker.name.clone(),
            kind: "escalator",
            value: format!(
                "Turn-Ins: {} | Last: {} | Next: {}",
                tracker.count,
                esc.last.map_or_else(|| "None".to_string(), |v| v.to_string()),
                esc.next
            ),
            note: Some(format!("id {}", tracker.id)),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<32} {:>12}", self.label, self.value)?;
        if let Some(note) = &self.note {
            write!(f, "  ({})", note)?;
        }
        Ok(())
    }
}

/// Summary of one seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatView {
    pub seat: PlayerId,
    pub name: String,
    pub color: String,
    pub active: bool,
    pub rows: Vec<Row>,
}

/// Everything a front end needs to draw one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    /// `"<game> • N players"`.
    pub title: String,
    /// `"Turn T"`.
    pub turn: String,
    /// Current phase name.
    pub phase: String,
    /// Active seat name, or `—`.
    pub active: String,
    /// Hint above the global rows.
    pub global_hint: String,
    /// Global resource rows.
    pub globals: Vec<Row>,
    /// `"N active player(s)"`.
    pub players_hint: String,
    /// Per-seat rows; every seat is listed, the active one flagged.
    pub seats: Vec<SeatView>,
    /// Panel ideas for the game, or a placeholder.
    pub ideas: Vec<String>,
}

impl GameView {
    /// Build the view of `state`.
    #[must_use]
    pub fn build(def: &GameDefinition, state: &GameState) -> Self {
        let n = state.player_count();
        let active_seat = state.active_player;

        let globals: Vec<Row> = def
            .resources_in(Scope::Global)
            .map(|res| Row::for_resource(res, state, active_seat))
            .collect();
        let global_hint = if globals.is_empty() {
            "No global resources for this game.".to_string()
        } else {
            "Adjust counters with + / -. Derived values update automatically.".to_string()
        };

        let seats = state
            .player_ids()
            .filter_map(|seat| {
                let p = state.player(seat)?;
                Some(SeatView {
                    seat,
                    name: p.name.clone(),
                    color: p.color.clone(),
                    active: seat == active_seat,
                    rows: def
                        .resources_in(Scope::PerPlayer)
                        .map(|res| Row::for_resource(res, state, seat))
                        .collect(),
                })
            })
            .collect();

        let ideas = if def.panel_ideas.is_empty() {
            vec!["Add your own panel ideas for this game.".to_string()]
        } else {
            def.panel_ideas.clone()
        };

        Self {
            title: format!("{} • {} players", def.name, n),
            turn: format!("Turn {}", state.turn),
            phase: def.phase_name(state.phase_index).to_string(),
            active: state.active().map_or_else(|| NONE_MARK.to_string(), |p| p.name.clone()),
            global_hint,
            globals,
            players_hint: format!("{} active player{}", n, if n == 1 { "" } else { "s" }),
            seats,
            ideas,
        }
    }
}

impl fmt::Display for GameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{} | {} | {}", self.turn, self.active, self.phase)?;
        writeln!(f)?;
        writeln!(f, "Global")?;
        writeln!(f, "  {}", self.global_hint)?;
        for row in &self.globals {
            writeln!(f, "  {}", row)?;
        }
        writeln!(f)?;
        writeln!(f, "Players ({})", self.players_hint)?;
        for seat in &self.seats {
            let marker = if seat.active { '>' } else { ' ' };
            writeln!(f, "{} {} [{}]", marker, seat.name, seat.color)?;
            for row in &seat.rows {
                writeln!(f, "    {}", row)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Ideas")?;
        for idea in &self.ideas {
            writeln!(f, "  - {}", idea)?;
        }
        Ok(())
    }
}
