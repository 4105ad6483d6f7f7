//! Tracker actions.
//!
//! Every user interaction (next seat, bump a counter, rename a player) is
//! one `Action`. Actions are data; `rules::apply` turns a state plus an
//! action into the next state.
//!
//! Actions also have a compact text form used by the CLI. Seat numbers in
//! the text form are 1-based, matching how `PlayerId` displays.
//!
//! ```
//! use bgt_tracker::core::{Action, PlayerId};
//!
//! let a: Action = "player:2:money:+3".parse().unwrap();
//! assert_eq!(a, Action::AdjustPlayer { player: PlayerId::new(1), key: "money".into(), delta: 3 });
//! assert_eq!(a.to_string(), "player:2:money:+3");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::error::StateError;

/// A single state transition request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Pass to the next seat; wrapping to the first seat starts a new turn.
    NextPlayer,
    /// Back to the previous seat; wrapping to the last seat undoes a turn.
    PrevPlayer,
    /// Make a seat active.
    SelectPlayer(PlayerId),
    /// Advance the phase, wrapping.
    NextPhase,
    /// Step the phase back, wrapping.
    PrevPhase,
    /// Turn +1 and seat +1.
    IncTurn,
    /// Turn -1 (floor 1) and seat -1.
    DecTurn,
    /// Add `delta` to a global counter or escalator.
    AdjustGlobal { key: String, delta: i64 },
    /// Add `delta` to a seat's counter or escalator.
    AdjustPlayer { player: PlayerId, key: String, delta: i64 },
    /// Set a global counter.
    SetGlobal { key: String, value: i64 },
    /// Rename a seat.
    RenamePlayer { player: PlayerId, name: String },
    /// Recolor a seat.
    RecolorPlayer { player: PlayerId, color: String },
    /// Start over with the same seat count.
    Restart,
    /// Start over with a different seat count.
    SetPlayerCount(usize),
}

impl Action {
    /// True when the action discards the current state.
    #[must_use]
    pub fn resets(&self) -> bool {
        matches!(self, Self::Restart | Self::SetPlayerCount(_))
    }
}

fn parse_seat(token: &str, raw: &str) -> Result<PlayerId, StateError> {
    match token.parse::<u8>() {
        Ok(n) if n >= 1 => Ok(PlayerId::new(n - 1)),
        _ => Err(StateError::BadAction(raw.to_string())),
    }
}

fn parse_int(token: &str, raw: &str) -> Result<i64, StateError> {
    token
        .strip_prefix('+')
        .unwrap_or(token)
        .parse()
        .map_err(|_| StateError::BadAction(raw.to_string()))
}

impl FromStr for Action {
    type Err = StateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let bad = || StateError::BadAction(raw.to_string());
        let text = raw.trim();

        match text {
            "next" => return Ok(Self::NextPlayer),
            "prev" => return Ok(Self::PrevPlayer),
            "phase+" => return Ok(Self::NextPhase),
            "phase-" => return Ok(Self::PrevPhase),
            "turn+" => return Ok(Self::IncTurn),
            "turn-" => return Ok(Self::DecTurn),
            "restart" => return Ok(Self::Restart),
            _ => {}
        }

        let (head, rest) = text.split_once(':').ok_or_else(bad)?;
        match head {
            "select" => Ok(Self::SelectPlayer(parse_seat(rest, raw)?)),
            "players" => rest.parse().map(Self::SetPlayerCount).map_err(|_| bad()),
            "global" => {
                let (key, delta) = rest.rsplit_once(':').ok_or_else(bad)?;
                Ok(Self::AdjustGlobal {
                    key: key.to_string(),
                    delta: parse_int(delta, raw)?,
                })
            }
            "set" => {
                let (key, value) = rest.rsplit_once(':').ok_or_else(bad)?;
                Ok(Self::SetGlobal {
                    key: key.to_string(),
                    value: parse_int(value, raw)?,
                })
            }
            "player" => {
                let (seat, rest) = rest.split_once(':').ok_or_else(bad)?;
                let (key, delta) = rest.rsplit_once(':').ok_or_else(bad)?;
                Ok(Self::AdjustPlayer {
                    player: parse_seat(seat, raw)?,
                    key: key.to_string(),
                    delta: parse_int(delta, raw)?,
                })
            }
            "name" => {
                let (seat, name) = rest.split_once(':').ok_or_else(bad)?;
                Ok(Self::RenamePlayer {
                    player: parse_seat(seat, raw)?,
                    name: name.to_string(),
                })
            }
            "color" => {
                let (seat, color) = rest.split_once(':').ok_or_else(bad)?;
                Ok(Self::RecolorPlayer {
                    player: parse_seat(seat, raw)?,
                    color: color.to_string(),
                })
            }
            _ => Err(bad()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seat = |p: &PlayerId| p.index() + 1;
        match self {
            Self::NextPlayer => write!(f, "next"),
            Self::PrevPlayer => write!(f, "prev"),
            Self::SelectPlayer(p) => write!(f, "select:{}", seat(p)),
            Self::NextPhase => write!(f, "phase+"),
            Self::PrevPhase => write!(f, "phase-"),
            Self::IncTurn => write!(f, "turn+"),
            Self::DecTurn => write!(f, "turn-"),
            Self::AdjustGlobal { key, delta } => write!(f, "global:{}:{:+}", key, delta),
            Self::AdjustPlayer { player, key, delta } => write!(f, "player:{}:{}:{:+}", seat(player), key, delta),
            Self::SetGlobal { key, value } => write!(f, "set:{}:{}", key, value),
            Self::RenamePlayer { player, name } => write!(f, "name:{}:{}", seat(player), name),
            Self::RecolorPlayer { player, color } => write!(f, "color:{}:{}", seat(player), color),
            Self::Restart => write!(f, "restart"),
            Self::SetPlayerCount(n) => write!(f, "players:{}", n),
        }
    }
}
