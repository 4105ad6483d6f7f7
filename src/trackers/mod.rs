//! Custom escalating trackers.
//!
//! Besides the resources a game definition declares, players can add
//! ad-hoc trackers at the table: a name, a schedule typed as
//! `"4, 6, 8, 10"` and a step. Each tracker counts occurrences and shows
//! the last and next reward through the shared escalation calculator.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TrackerIds;
use crate::error::StateError;
use crate::escalation::{compute_escalation, Escalation, Schedule};

/// Name given to trackers added without one.
pub const DEFAULT_NAME: &str = "Tracker";

/// Step used when none is typed.
pub const DEFAULT_STEP: i64 = 5;

/// A user-defined escalating tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    /// Board-unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Occurrences so far (>= 0).
    pub count: i64,
    /// Fixed rewards for the first occurrences.
    pub schedule: Schedule,
    /// Increment past the end of the schedule.
    pub step: i64,
}

impl Tracker {
    /// `(last, next)` at the current count.
    #[must_use]
    pub fn escalation(&self) -> Escalation {
        compute_escalation(self.count, self.schedule.as_slice(), self.step)
    }

    /// Copy with `count` and `step` pulled up to 0, for trackers read back
    /// from storage.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            count: self.count.max(0),
            step: self.step.max(0),
            ..self
        }
    }
}

/// Parse a typed schedule such as `"4, 6, 8"`.
///
/// Entries are comma separated and trimmed; blanks, non-integers and
/// non-positive values are dropped.
///
/// ```
/// use bgt_tracker::trackers::parse_schedule_input;
///
/// assert_eq!(parse_schedule_input("4, 6,, x, -2, 8").as_slice(), &[4, 6, 8]);
/// ```
#[must_use]
pub fn parse_schedule_input(text: &str) -> Schedule {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .filter(|&n| n > 0)
        .collect()
}

/// Parse a typed step: blank means `DEFAULT_STEP`, anything else is read
/// as an integer (unparseable reads as `DEFAULT_STEP`) and raised to at
/// least 1.
#[must_use]
pub fn parse_step_input(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return DEFAULT_STEP;
    }
    text.parse::<i64>().unwrap_or(DEFAULT_STEP).max(1)
}

/// The set of custom trackers in display order.
#[derive(Clone, Debug, Default)]
pub struct TrackerBoard {
    trackers: Vec<Tracker>,
    ids: TrackerIds,
}

impl TrackerBoard {
    /// Empty board with OS-seeded ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board over existing trackers, drawing new ids from `ids`.
    /// Negative counts and steps are raised to 0.
    #[must_use]
    pub fn with_trackers(trackers: Vec<Tracker>, ids: TrackerIds) -> Self {
        Self {
            trackers: trackers.into_iter().map(Tracker::normalized).collect(),
            ids,
        }
    }

    /// Add a tracker from typed form input and return its id.
    pub fn add(&mut self, name: &str, schedule_text: &str, step_text: &str) -> String {
        let name = match name.trim() {
            "" => DEFAULT_NAME,
            trimmed => trimmed,
        };
        let trackers = &self.trackers;
        let id = self.ids.next_unused(|candidate| trackers.iter().any(|t| t.id == candidate));
        let tracker = Tracker {
            id: id.clone(),
            name: name.to_string(),
            count: 0,
            schedule: parse_schedule_input(schedule_text),
            step: parse_step_input(step_text),
        };
        debug!(id = %tracker.id, name = %tracker.name, schedule = %tracker.schedule, step = tracker.step, "added tracker");
        self.trackers.push(tracker);
        id
    }

    /// Get a tracker by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tracker> {
        self.trackers.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Tracker, StateError> {
        self.trackers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StateError::UnknownTracker(id.to_string()))
    }

    /// Record one more occurrence.
    pub fn increment(&mut self, id: &str) -> Result<Escalation, StateError> {
        let tracker = self.get_mut(id)?;
        tracker.count = tracker.count.saturating_add(1);
        Ok(tracker.escalation())
    }

    /// Undo one occurrence; the count never drops below 0.
    pub fn decrement(&mut self, id: &str) -> Result<Escalation, StateError> {
        let tracker = self.get_mut(id)?;
        tracker.count = (tracker.count - 1).max(0);
        Ok(tracker.escalation())
    }

    /// Remove a tracker.
    pub fn remove(&mut self, id: &str) -> Result<Tracker, StateError> {
        let pos = self
            .trackers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StateError::UnknownTracker(id.to_string()))?;
        Ok(self.trackers.remove(pos))
    }

    /// Remove every tracker.
    pub fn clear(&mut self) {
        self.trackers.clear();
    }

    /// `(last, next)` of a tracker.
    pub fn escalation(&self, id: &str) -> Result<Escalation, StateError> {
        self.get(id)
            .map(Tracker::escalation)
            .ok_or_else(|| StateError::UnknownTracker(id.to_string()))
    }

    /// Trackers in display order.
    #[must_use]
    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    /// Number of trackers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}
