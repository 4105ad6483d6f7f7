//! # bgt-tracker
//!
//! Companion tracker for tabletop board games: per-game and per-player
//! counters, derived values and escalating reward schedules.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games are JSON `GameDefinition`s, not code. Four
//!    ship built in (Risk, Risk: Clone Wars, Dune: War for Arrakis,
//!    Ark Nova).
//!
//! 2. **One Escalation Rule**: Escalator resources, derived values and
//!    custom trackers all go through `escalation::compute_escalation`.
//!
//! 3. **Immutable State Records**: Actions never mutate a `GameState`;
//!    `rules::apply` returns the next record. `im` collections keep that
//!    cheap.
//!
//! 4. **Validate at Load**: Unknown resource types, scopes and derivation
//!    names are rejected when a definition loads.
//!
//! ## Modules
//!
//! - `escalation`: schedule + step reward calculator
//! - `core`: players, game definitions, state, actions, ids
//! - `derive`: derived-value kinds
//! - `rules`: the state reducer
//! - `catalog`: built-in and on-disk game definitions
//! - `trackers`: ad-hoc escalating trackers
//! - `store`: key-value persistence
//! - `session`: load / act / save loop
//! - `view`: display rows

pub mod escalation;
pub mod error;
pub mod core;
pub mod derive;
pub mod rules;
pub mod catalog;
pub mod trackers;
pub mod store;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::escalation::{compute_escalation, Escalation, Schedule, ScheduleRule};

pub use crate::error::{ConfigError, StateError, StoreError, TrackerError};

pub use crate::core::{
    Action, FieldKind, GameDefinition, GameState, PlayerField, PlayerId, PlayerState,
    ResourceDef, ResourceKind, Scope, TrackerIds,
};

pub use crate::derive::Derivation;
pub use crate::catalog::Catalog;
pub use crate::trackers::{Tracker, TrackerBoard};
pub use crate::store::{FileStore, MemoryStore, StateStore};
pub use crate::session::Session;
pub use crate::view::{GameView, Row, SeatView};
