//! Error types.
//!
//! Each concern has its own enum; `TrackerError` wraps them for callers
//! that drive the whole pipeline (load definition, load state, act, save).

use std::path::PathBuf;

use thiserror::Error;

use crate::core::PlayerId;

/// Game definition loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read game definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse game definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("resource `{key}` has unknown type `{found}` (expected number, derived or escalator)")]
    UnknownResourceType { key: String, found: String },
    #[error("resource `{key}` has unknown scope `{found}` (expected global or perPlayer)")]
    UnknownScope { key: String, found: String },
    #[error("resource `{key}` uses unknown derivation `{name}`")]
    UnknownDerivation { key: String, name: String },
    #[error("resource `{key}` is derived but has no derive block")]
    MissingDerivation { key: String },
    #[error("derivation `{name}` takes {expected} argument(s), got {found}")]
    DerivationArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("resource `{key}` references `{reference}`, which is not a {scope} number resource")]
    UnknownResource {
        key: String,
        reference: String,
        scope: String,
    },
    #[error("resource key `{0}` is defined more than once")]
    DuplicateResource(String),
    #[error("game key `{0}` may only contain ASCII letters, digits, `-` and `_`")]
    InvalidGameKey(String),
    #[error("invalid player range {min}..={max}")]
    InvalidPlayerRange { min: usize, max: usize },
    #[error("resource `{key}` has min {min} above max {max}")]
    InvalidBounds { key: String, min: i64, max: i64 },
    #[error("game `{0}` is defined more than once")]
    DuplicateGame(String),
}

/// Errors from applying an action to a game state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("resource `{key}` is {actual}, not {expected}")]
    ScopeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("resource `{0}` is derived and cannot be changed directly")]
    ReadOnlyResource(String),
    #[error("{0} is not in this game")]
    UnknownPlayer(PlayerId),
    #[error("unknown tracker `{0}`")]
    UnknownTracker(String),
    #[error("cannot parse action `{0}`")]
    BadAction(String),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// Any error the tracker can produce.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown game `{0}`")]
    UnknownGame(String),
}

/// Result alias for whole-pipeline operations.
pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
