//! Core tracker types: players, game definitions, state, actions, ids.
//!
//! This module contains the game-agnostic building blocks. Individual
//! games are described by a `GameDefinition` rather than by code.

pub mod player;
pub mod config;
pub mod action;
pub mod state;
pub mod rng;

pub use player::{PlayerId, PlayerState, DEFAULT_COLORS};
pub use config::{FieldKind, GameDefinition, PlayerField, ResourceDef, ResourceKind, Scope, FREE_PLAY};
pub use action::Action;
pub use state::GameState;
pub use rng::TrackerIds;
