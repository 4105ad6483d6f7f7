//! Schedule storage and the `schedule + step` rule bundle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::compute::{compute_escalation, Escalation};

/// Ordered reward values for the first N occurrences of an event.
///
/// SmallVec keeps typical schedules (Risk has 6 slots) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(SmallVec<[i64; 8]>);

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schedule from a slice of reward values.
    #[must_use]
    pub fn from_slice(values: &[i64]) -> Self {
        Self(SmallVec::from_slice(values))
    }

    /// Reward values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Number of scheduled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the schedule has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i64>> for Schedule {
    fn from(values: Vec<i64>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl FromIterator<i64> for Schedule {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(i64::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// A schedule paired with its post-schedule step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// Fixed rewards for the first occurrences.
    pub schedule: Schedule,

    /// Increment per occurrence once the schedule is exhausted.
    pub step: i64,
}

impl ScheduleRule {
    /// Create a rule. Negative steps are stored as 0.
    #[must_use]
    pub fn new(schedule: Schedule, step: i64) -> Self {
        Self {
            schedule,
            step: step.max(0),
        }
    }

    /// Classic Risk card turn-in armies: 4, 6, 8, 10, 12, 15, then +5.
    #[must_use]
    pub fn risk_cards() -> Self {
        Self::new(Schedule::from_slice(&[4, 6, 8, 10, 12, 15]), 5)
    }

    /// Evaluate the rule at `count` occurrences.
    #[must_use]
    pub fn at(&self, count: i64) -> Escalation {
        compute_escalation(count, self.schedule.as_slice(), self.step)
    }
}
