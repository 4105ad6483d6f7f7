//! Key-value persistence.
//!
//! The tracker saves a small JSON blob per key, the way a browser app
//! would use local storage:
//! - `bgt_state_<game>`: the `GameState` of one game
//! - `riskEscalators`: the custom tracker board
//!
//! `StateStore` is the seam. `MemoryStore` backs tests and throwaway
//! sessions; `FileStore` keeps one `<key>.json` file per key.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use tracing::{debug, warn};

use crate::core::GameState;
use crate::error::StoreError;
use crate::trackers::Tracker;

/// Prefix of per-game state keys.
pub const GAME_STATE_PREFIX: &str = "bgt_state_";

/// Key of the custom tracker board.
pub const TRACKERS_KEY: &str = "riskEscalators";

/// String key-value storage.
pub trait StateStore {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// True when `key` is usable as a storage key: non-empty ASCII letters,
/// digits, `-` and `_`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Storage key of a game's state.
#[must_use]
pub fn game_state_key(game: &str) -> String {
    format!("{}{}", GAME_STATE_PREFIX, game)
}

/// Load a saved game state.
///
/// Missing and corrupt entries both return `Ok(None)` so the caller starts
/// fresh; corrupt data is logged. Only storage failures are errors.
pub fn load_game_state(store: &dyn StateStore, game: &str) -> Result<Option<GameState>, StoreError> {
    let key = game_state_key(game);
    let Some(raw) = store.read(&key)? else {
        debug!(game, "no saved state");
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(state) => Ok(Some(state)),
        Err(err) => {
            warn!(game, error = %err, "ignoring corrupt saved state");
            Ok(None)
        }
    }
}

/// Save a game state.
pub fn save_game_state(store: &mut dyn StateStore, game: &str, state: &GameState) -> Result<(), StoreError> {
    let json = serde_json::to_string(state)?;
    store.write(&game_state_key(game), &json)
}

/// Load the custom tracker board. Missing or corrupt data reads as empty.
pub fn load_trackers(store: &dyn StateStore) -> Result<Vec<Tracker>, StoreError> {
    let Some(raw) = store.read(TRACKERS_KEY)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<Tracker>>(&raw) {
        Ok(trackers) => Ok(trackers.into_iter().map(Tracker::normalized).collect()),
        Err(err) => {
            warn!(error = %err, "ignoring corrupt tracker board");
            Ok(Vec::new())
        }
    }
}

/// Save the custom tracker board.
pub fn save_trackers(store: &mut dyn StateStore, trackers: &[Tracker]) -> Result<(), StoreError> {
    let json = serde_json::to_string(trackers)?;
    store.write(TRACKERS_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::escalation::Schedule;

    #[test]
    fn test_game_state_key() {
        assert_eq!(game_state_key("risk"), "bgt_state_risk");
    }

    #[test]
    fn test_game_state_round_trip() {
        let catalog = Catalog::builtin().unwrap();
        let def = catalog.get("arknova").unwrap();
        let state = GameState::fresh(def, 3).with_global("breakMeter", 7);

        let mut store = MemoryStore::new();
        assert!(load_game_state(&store, "arknova").unwrap().is_none());

        save_game_state(&mut store, "arknova", &state).unwrap();
        assert_eq!(load_game_state(&store, "arknova").unwrap(), Some(state));
    }

    #[test]
    fn test_corrupt_state_reads_as_missing() {
        let mut store = MemoryStore::new();
        store.write("bgt_state_risk", "{not json").unwrap();
        assert!(load_game_state(&store, "risk").unwrap().is_none());
    }

    #[test]
    fn test_trackers_round_trip() {
        let mut store = MemoryStore::new();
        assert!(load_trackers(&store).unwrap().is_empty());

        let trackers = vec![Tracker {
            id: "abc".into(),
            name: "Bribes".into(),
            count: 2,
            schedule: Schedule::from_slice(&[1, 2, 3]),
            step: 5,
        }];
        save_trackers(&mut store, &trackers).unwrap();
        assert_eq!(load_trackers(&store).unwrap(), trackers);

        store.write(TRACKERS_KEY, "[{").unwrap();
        assert!(load_trackers(&store).unwrap().is_empty());
    }

    #[test]
    fn test_loaded_tracker_counts_are_not_negative() {
        let mut store = MemoryStore::new();
        store
            .write(
                TRACKERS_KEY,
                r#"[{"id":"t1","name":"Bribes","count":-5,"schedule":[4,6],"step":5}]"#,
            )
            .unwrap();

        let trackers = load_trackers(&store).unwrap();
        assert_eq!(trackers[0].count, 0);
        assert_eq!(trackers[0].escalation().last, None);
    }
}
