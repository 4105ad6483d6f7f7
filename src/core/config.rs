//! Game definition types.
//!
//! A game definition describes what the tracker shows for one board game:
//! - the player range and turn phases
//! - `ResourceDef`s: plain counters, derived values and escalators
//! - the per-player text/color fields
//!
//! Definitions are JSON files (`games/<key>.json`). They are parsed into
//! loosely-typed raw structs first and then validated into the types below,
//! so every string tag is resolved exactly once, at load time.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::derive::Derivation;
use crate::error::ConfigError;
use crate::escalation::{Schedule, ScheduleRule};
use crate::store;

/// Phase label shown when a game has no phases.
pub const FREE_PLAY: &str = "Free Play";

/// Where a resource's value lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One value shared by the table (round counter, break meter).
    Global,
    /// One value per seat (money, victory points).
    PerPlayer,
}

impl Scope {
    fn parse(key: &str, raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            Some("global") => Ok(Self::Global),
            Some("perPlayer") => Ok(Self::PerPlayer),
            other => Err(ConfigError::UnknownScope {
                key: key.to_string(),
                found: other.unwrap_or("<missing>").to_string(),
            }),
        }
    }

    /// Config name of the scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::PerPlayer => "perPlayer",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of value a resource is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    /// A stored counter, optionally bounded.
    Number { min: Option<i64>, max: Option<i64> },
    /// A read-only value computed from other resources.
    Derived(Derivation),
    /// An escalating reward schedule driven by a counter.
    Escalator {
        rule: ScheduleRule,
        /// Resource holding the occurrence count. Equal to the escalator's
        /// own key when the escalator owns its counter.
        counter_key: String,
    },
}

impl ResourceKind {
    /// Config name of the kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Derived(_) => "derived",
            Self::Escalator { .. } => "escalator",
        }
    }
}

/// A validated resource definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDef {
    /// State key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Where the value lives.
    pub scope: Scope,
    /// Value kind.
    pub kind: ResourceKind,
}

impl ResourceDef {
    /// Create a plain bounded counter.
    pub fn number(key: impl Into<String>, label: impl Into<String>, scope: Scope, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            scope,
            kind: ResourceKind::Number { min, max },
        }
    }

    /// True when the resource has a stored value in the state record.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        match &self.kind {
            ResourceKind::Number { .. } => true,
            ResourceKind::Derived(_) => false,
            ResourceKind::Escalator { counter_key, .. } => *counter_key == self.key,
        }
    }

    /// True for plain counters.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.kind, ResourceKind::Number { .. })
    }

    /// Bounds applied to the stored value. Escalator-owned counters never
    /// go below 0.
    #[must_use]
    pub fn bounds(&self) -> (Option<i64>, Option<i64>) {
        match &self.kind {
            ResourceKind::Number { min, max } => (*min, *max),
            ResourceKind::Escalator { .. } => (Some(0), None),
            ResourceKind::Derived(_) => (None, None),
        }
    }

    /// Clamp a value into this resource's bounds.
    #[must_use]
    pub fn clamp(&self, value: i64) -> i64 {
        let (min, max) = self.bounds();
        let value = min.map_or(value, |m| value.max(m));
        max.map_or(value, |m| value.min(m))
    }

    /// Value a fresh game starts with: the lower bound, or 0.
    #[must_use]
    pub fn initial_value(&self) -> i64 {
        self.bounds().0.unwrap_or(0)
    }
}

/// Kind of a per-player display field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Color,
}

/// A per-player display field (name, faction, color).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
}

/// Complete validated game definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameDefinition {
    /// Catalog key (`risk`, `arknova`, ...).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Fewest seats the game supports (>= 1).
    pub min_players: usize,
    /// Most seats the game supports.
    pub max_players: usize,
    /// Turn phases in order.
    pub phases: Vec<String>,
    /// Tracked resources in display order.
    pub resources: Vec<ResourceDef>,
    /// Per-player display fields.
    pub player_fields: Vec<PlayerField>,
    /// Free-text ideas for extra panels.
    pub panel_ideas: Vec<String>,
}

impl GameDefinition {
    /// Parse and validate a JSON game definition.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawGame = serde_json::from_str(json)?;
        raw.validate()
    }

    /// Read and validate a game definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let def = Self::from_json(&text)?;
        debug!(game = %def.key, path = %path.display(), "loaded game definition");
        Ok(def)
    }

    /// Get a resource by key.
    #[must_use]
    pub fn resource(&self, key: &str) -> Option<&ResourceDef> {
        self.resources.iter().find(|r| r.key == key)
    }

    /// Resources in `scope`, in display order.
    pub fn resources_in(&self, scope: Scope) -> impl Iterator<Item = &ResourceDef> {
        self.resources.iter().filter(move |r| r.scope == scope)
    }

    /// Resources in `scope` that hold a stored value.
    pub fn stored_in(&self, scope: Scope) -> impl Iterator<Item = &ResourceDef> {
        self.resources_in(scope).filter(|r| r.is_stored())
    }

    /// Clamp a seat count into the supported range.
    #[must_use]
    pub fn clamp_player_count(&self, count: usize) -> usize {
        count.clamp(self.min_players, self.max_players)
    }

    /// Name of the phase at `index`, or "Free Play".
    #[must_use]
    pub fn phase_name(&self, index: usize) -> &str {
        self.phases.get(index).map_or(FREE_PLAY, String::as_str)
    }

    /// Label used to name fresh seats ("Faction", "Name", ...).
    #[must_use]
    pub fn seat_label(&self) -> &str {
        self.player_fields.first().map_or("Player", |f| f.label.as_str())
    }
}

// === Raw JSON shape ===

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGame {
    key: String,
    name: String,
    min_players: usize,
    max_players: usize,
    #[serde(default)]
    phases: Vec<String>,
    #[serde(default)]
    resources: Vec<RawResource>,
    #[serde(default)]
    players: RawPlayers,
    #[serde(default)]
    panel_ideas: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResource {
    key: String,
    label: String,
    #[serde(rename = "type")]
    kind: String,
    scope: Option<String>,
    min: Option<i64>,
    max: Option<i64>,
    derive: Option<RawDerive>,
    schedule: Option<Vec<i64>>,
    step: Option<i64>,
    counter_key: Option<String>,
}

#[derive(Deserialize)]
struct RawDerive {
    #[serde(rename = "fn")]
    name: String,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Deserialize, Default)]
struct RawPlayers {
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Deserialize)]
struct RawField {
    key: String,
    label: String,
    #[serde(rename = "type")]
    kind: String,
}

impl RawGame {
    fn validate(self) -> Result<GameDefinition, ConfigError> {
        // The key names the game's saved state.
        if !store::is_valid_key(&self.key) {
            return Err(ConfigError::InvalidGameKey(self.key));
        }
        if self.min_players == 0 || self.min_players > self.max_players || self.max_players > u8::MAX as usize {
            return Err(ConfigError::InvalidPlayerRange {
                min: self.min_players,
                max: self.max_players,
            });
        }

        let mut seen = FxHashSet::default();
        let mut resources = Vec::with_capacity(self.resources.len());
        for raw in self.resources {
            if !seen.insert(raw.key.clone()) {
                return Err(ConfigError::DuplicateResource(raw.key));
            }
            resources.push(raw.validate()?);
        }

        for res in &resources {
            let refs: Vec<&str> = match &res.kind {
                ResourceKind::Number { .. } => continue,
                ResourceKind::Derived(d) => d.inputs(),
                ResourceKind::Escalator { counter_key, .. } if *counter_key == res.key => continue,
                ResourceKind::Escalator { counter_key, .. } => vec![counter_key.as_str()],
            };
            for reference in refs {
                let ok = resources
                    .iter()
                    .any(|r| r.key == reference && r.scope == res.scope && r.is_number());
                if !ok {
                    return Err(ConfigError::UnknownResource {
                        key: res.key.clone(),
                        reference: reference.to_string(),
                        scope: res.scope.to_string(),
                    });
                }
            }
        }

        let player_fields = self
            .players
            .fields
            .into_iter()
            .map(|f| PlayerField {
                kind: if f.kind == "color" { FieldKind::Color } else { FieldKind::Text },
                key: f.key,
                label: f.label,
            })
            .collect();

        Ok(GameDefinition {
            key: self.key,
            name: self.name,
            min_players: self.min_players,
            max_players: self.max_players,
            phases: self.phases,
            resources,
            player_fields,
            panel_ideas: self.panel_ideas,
        })
    }
}

impl RawResource {
    fn validate(self) -> Result<ResourceDef, ConfigError> {
        let kind = match self.kind.as_str() {
            "number" => {
                if let (Some(min), Some(max)) = (self.min, self.max) {
                    if min > max {
                        return Err(ConfigError::InvalidBounds { key: self.key, min, max });
                    }
                }
                ResourceKind::Number {
                    min: self.min,
                    max: self.max,
                }
            }
            "derived" => {
                let derive = self
                    .derive
                    .ok_or_else(|| ConfigError::MissingDerivation { key: self.key.clone() })?;
                ResourceKind::Derived(Derivation::parse(&self.key, &derive.name, &derive.args)?)
            }
            "escalator" => ResourceKind::Escalator {
                rule: ScheduleRule::new(Schedule::from(self.schedule.unwrap_or_default()), self.step.unwrap_or(1)),
                counter_key: self.counter_key.unwrap_or_else(|| self.key.clone()),
            },
            other => {
                return Err(ConfigError::UnknownResourceType {
                    key: self.key,
                    found: other.to_string(),
                })
            }
        };
        let scope = Scope::parse(&self.key, self.scope.as_deref())?;

        Ok(ResourceDef {
            key: self.key,
            label: self.label,
            scope,
            kind,
        })
    }
}
