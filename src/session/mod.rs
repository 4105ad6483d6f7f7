//! A game being tracked.
//!
//! `Session` ties a definition, the current state record and a store
//! together: it loads saved state (or starts fresh), applies actions
//! through `rules::apply`, and saves after every successful action.

use tracing::{debug, info};

use crate::core::{Action, GameDefinition, GameState};
use crate::error::{Result, StoreError};
use crate::rules;
use crate::store::{self, StateStore};
use crate::view::GameView;

/// A tracked game backed by a store.
pub struct Session<S: StateStore> {
    def: GameDefinition,
    state: GameState,
    store: S,
}

impl<S: StateStore> Session<S> {
    /// Open `def`, restoring saved state when there is any.
    ///
    /// `desired_players` overrides the saved seat count; without saved
    /// state it picks the fresh seat count (default: the game minimum).
    pub fn open(def: GameDefinition, store: S, desired_players: Option<usize>) -> Result<Self> {
        let state = match store::load_game_state(&store, &def.key)? {
            Some(saved) => {
                debug!(game = %def.key, turn = saved.turn, "restored saved state");
                saved.reconcile(&def, desired_players)
            }
            None => GameState::fresh(&def, desired_players.unwrap_or(def.min_players)),
        };
        info!(game = %def.key, players = state.player_count(), "session opened");
        Ok(Self { def, state, store })
    }

    /// Apply one action and save the result.
    ///
    /// On error the state is unchanged and nothing is saved.
    pub fn act(&mut self, action: &Action) -> Result<&GameState> {
        let next = rules::apply(&self.def, &self.state, action)?;
        store::save_game_state(&mut self.store, &self.def.key, &next)?;
        if action.resets() {
            info!(game = %self.def.key, players = next.player_count(), "game restarted");
        } else {
            debug!(game = %self.def.key, %action, turn = next.turn, active = %next.active_player, "applied action");
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Apply actions in order, stopping at the first error.
    pub fn act_all<'a>(&mut self, actions: impl IntoIterator<Item = &'a Action>) -> Result<&GameState> {
        for action in actions {
            self.act(action)?;
        }
        Ok(&self.state)
    }

    /// Drop the saved state and start fresh with the same seat count.
    pub fn reset(&mut self) -> Result<&GameState, StoreError> {
        self.store.remove(&store::game_state_key(&self.def.key))?;
        self.state = GameState::fresh(&self.def, self.state.player_count());
        info!(game = %self.def.key, "session reset");
        Ok(&self.state)
    }

    /// Save the current state without changing it.
    pub fn save(&mut self) -> Result<(), StoreError> {
        store::save_game_state(&mut self.store, &self.def.key, &self.state)
    }

    /// Current state record.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The game definition.
    #[must_use]
    pub fn definition(&self) -> &GameDefinition {
        &self.def
    }

    /// Display rows for the current state.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::build(&self.def, &self.state)
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
