//! Game catalog.
//!
//! The catalog holds every game definition the tracker can open. Four
//! games ship built in (embedded from `games/*.json`); more can be loaded
//! from a directory of definition files, replacing built-ins that share a
//! key.
//!
//! ## Example
//!
//! ```
//! use bgt_tracker::catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let risk = catalog.get("risk").unwrap();
//! assert_eq!(risk.name, "Risk (Classic)");
//! ```

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::core::GameDefinition;
use crate::error::{ConfigError, TrackerError};

const BUILTIN: [&str; 4] = [
    include_str!("../../games/risk.json"),
    include_str!("../../games/risk-clonewars.json"),
    include_str!("../../games/dune-war-for-arrakis.json"),
    include_str!("../../games/arknova.json"),
];

/// Ordered collection of game definitions, unique by key.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    games: Vec<GameDefinition>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in games.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for json in BUILTIN {
            catalog.insert(GameDefinition::from_json(json)?);
        }
        Ok(catalog)
    }

    /// Load every `*.json` definition in `dir`, in file name order.
    ///
    /// Two files defining the same key is an error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let io_err = |source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        let mut seen = FxHashSet::default();
        for path in paths {
            let def = GameDefinition::load(&path)?;
            if !seen.insert(def.key.clone()) {
                return Err(ConfigError::DuplicateGame(def.key));
            }
            catalog.insert(def);
        }
        info!(dir = %dir.display(), games = catalog.len(), "loaded game definitions");
        Ok(catalog)
    }

    /// Add a definition, replacing any existing one with the same key.
    pub fn insert(&mut self, def: GameDefinition) {
        match self.games.iter_mut().find(|g| g.key == def.key) {
            Some(slot) => {
                debug!(game = %def.key, "replacing game definition");
                *slot = def;
            }
            None => self.games.push(def),
        }
    }

    /// Merge another catalog into this one; its definitions win.
    pub fn merge(&mut self, other: Catalog) {
        for def in other.games {
            self.insert(def);
        }
    }

    /// Get a definition by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GameDefinition> {
        self.games.iter().find(|g| g.key == key)
    }

    /// Get a definition by key, failing for unknown keys.
    pub fn require(&self, key: &str) -> Result<&GameDefinition, TrackerError> {
        self.get(key).ok_or_else(|| TrackerError::UnknownGame(key.to_string()))
    }

    /// The first definition (the default selection).
    #[must_use]
    pub fn first(&self) -> Option<&GameDefinition> {
        self.games.first()
    }

    /// Keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|g| g.key.as_str())
    }

    /// Iterate over definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &GameDefinition> {
        self.games.iter()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
