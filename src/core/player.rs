//! Player identification and per-player tracked values.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Board games here seat at most a handful of
//! players, so a `u8` is plenty.
//!
//! ## PlayerState
//!
//! Name, color and the per-player resource values of one seat. Values live
//! in an `im::OrdMap` so cloning a state record is O(1) and serialized key
//! order is stable.

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// Seat colors handed out to fresh players, cycled when there are more
/// seats than colors.
pub const DEFAULT_COLORS: [&str; 6] = ["#5BC0EB", "#F25F5C", "#FFE066", "#247BA0", "#70C1B3", "#C77DFF"];

/// Player seat identifier.
///
/// Indices are 0-based: the first seat is `PlayerId(0)`. `Display` is
/// 1-based because that is what players read on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` seats.
    ///
    /// ```
    /// use bgt_tracker::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(u8::MAX as usize) as u8).map(PlayerId)
    }

    /// Seat `delta` places away, wrapping around `player_count` seats.
    #[must_use]
    pub fn offset(self, delta: i64, player_count: usize) -> Self {
        if player_count == 0 {
            return self;
        }
        let n = player_count as i64;
        let idx = (self.0 as i64 + delta).rem_euclid(n);
        Self(idx as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// One seat's display fields and per-player resource values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Seat color as `#rrggbb`.
    #[serde(default)]
    pub color: String,

    /// Per-player resource values by resource key.
    #[serde(default)]
    pub resources: OrdMap<String, i64>,
}

impl PlayerState {
    /// Create a seat with no resource values yet.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            resources: OrdMap::new(),
        }
    }

    /// Default seat for index `seat`, labelled with the game's first
    /// player field (e.g. "Faction 2").
    #[must_use]
    pub fn seated(seat: PlayerId, label: &str) -> Self {
        Self::new(
            format!("{} {}", label, seat.index() + 1),
            DEFAULT_COLORS[seat.index() % DEFAULT_COLORS.len()],
        )
    }

    /// Get a resource value with default.
    #[must_use]
    pub fn get(&self, key: &str, default: i64) -> i64 {
        self.resources.get(key).copied().unwrap_or(default)
    }

    /// Return a copy with `key` set to `value`.
    #[must_use]
    pub fn with_value(&self, key: impl Into<String>, value: i64) -> Self {
        Self {
            resources: self.resources.update(key.into(), value),
            ..self.clone()
        }
    }
}
