//! Derived resources: values computed from other tracked values.
//!
//! Game definitions name a derivation (`"fn": "riskNextArmies"`) and the
//! resources it reads (`"args": ["setsTurnedIn"]`). The name is resolved
//! to a `Derivation` variant when the definition loads, so an unknown name
//! is a configuration error rather than a blank row at display time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::escalation::ScheduleRule;

/// A known derivation with its input resources bound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Derivation {
    /// Armies the next Risk card set turn-in pays, given how many sets
    /// have been turned in.
    RiskNextArmies {
        /// Counter of sets turned in so far.
        counter: String,
    },
}

impl Derivation {
    /// Config name of the Risk turn-in derivation.
    pub const RISK_NEXT_ARMIES: &'static str = "riskNextArmies";

    /// Resolve a config-supplied derivation name and its arguments.
    ///
    /// `resource` is the key of the resource being defined, used in errors.
    pub fn parse(resource: &str, name: &str, args: &[String]) -> Result<Self, ConfigError> {
        match name {
            Self::RISK_NEXT_ARMIES => {
                let [counter] = args else {
                    return Err(ConfigError::DerivationArity {
                        name: name.to_string(),
                        expected: 1,
                        found: args.len(),
                    });
                };
                Ok(Self::RiskNextArmies {
                    counter: counter.clone(),
                })
            }
            _ => Err(ConfigError::UnknownDerivation {
                key: resource.to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Config name of this derivation.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RiskNextArmies { .. } => Self::RISK_NEXT_ARMIES,
        }
    }

    /// Resource keys this derivation reads, in argument order.
    #[must_use]
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Self::RiskNextArmies { counter } => vec![counter.as_str()],
        }
    }

    /// Compute the derived value. `lookup` returns the current value of an
    /// input resource.
    pub fn evaluate(&self, lookup: impl Fn(&str) -> i64) -> i64 {
        match self {
            Self::RiskNextArmies { counter } => ScheduleRule::risk_cards().at(lookup(counter.as_str())).next,
        }
    }
}
