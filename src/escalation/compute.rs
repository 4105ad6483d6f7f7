//! The escalation calculator.

use serde::{Deserialize, Serialize};

/// Reward of the most recent occurrence and of the upcoming one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Escalation {
    /// Reward of the latest occurrence. `None` until the event has happened
    /// at least once, so "never happened" is distinct from "paid 0".
    pub last: Option<i64>,

    /// Reward the next occurrence would pay.
    pub next: i64,
}

impl std::fmt::Display for Escalation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last {
            Some(last) => write!(f, "{} → {}", last, self.next),
            None => write!(f, "— → {}", self.next),
        }
    }
}

/// Compute `(last, next)` for an event that has happened `count` times.
///
/// Negative `count` and `step` are clamped to 0. Past the end of the
/// schedule each occurrence adds `step` to the final entry (0 for an empty
/// schedule). Arithmetic saturates instead of overflowing.
#[must_use]
pub fn compute_escalation(count: i64, schedule: &[i64], step: i64) -> Escalation {
    let count = count.max(0);
    let step = step.max(0);
    let len = i64::try_from(schedule.len()).unwrap_or(i64::MAX);
    let tail = schedule.last().copied().unwrap_or(0);

    let beyond = |occurrence: i64| tail.saturating_add((occurrence - len).saturating_mul(step));

    // Occurrences are 1-indexed; slot `n` holds the reward of occurrence n+1.
    let reward = |occurrence: i64| {
        if occurrence <= len {
            schedule[(occurrence - 1) as usize]
        } else {
            beyond(occurrence)
        }
    };

    let last = (count > 0).then(|| reward(count));
    let next = reward(count.saturating_add(1));

    Escalation { last, next }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISK: [i64; 6] = [4, 6, 8, 10, 12, 15];

    #[test]
    fn test_zero_count_has_no_last() {
        for step in [0, 1, 5] {
            assert_eq!(compute_escalation(0, &RISK, step).last, None);
            assert_eq!(compute_escalation(0, &[], step).last, None);
        }
    }

    #[test]
    fn test_empty_schedule_starts_at_step() {
        assert_eq!(compute_escalation(0, &[], 7), Escalation { last: None, next: 7 });
        assert_eq!(compute_escalation(1, &[], 7), Escalation { last: Some(7), next: 14 });
        assert_eq!(compute_escalation(3, &[], 7), Escalation { last: Some(21), next: 28 });
    }

    #[test]
    fn test_first_slot() {
        assert_eq!(compute_escalation(0, &[4, 6, 8], 5).next, 4);
    }

    #[test]
    fn test_inside_schedule() {
        assert_eq!(compute_escalation(3, &RISK, 5), Escalation { last: Some(8), next: 10 });
        assert_eq!(compute_escalation(1, &RISK, 5), Escalation { last: Some(4), next: 6 });
    }

    #[test]
    fn test_schedule_boundary() {
        assert_eq!(compute_escalation(5, &RISK, 5), Escalation { last: Some(12), next: 15 });
        assert_eq!(compute_escalation(6, &RISK, 5), Escalation { last: Some(15), next: 20 });
    }

    #[test]
    fn test_past_schedule() {
        assert_eq!(compute_escalation(8, &RISK, 5), Escalation { last: Some(25), next: 30 });
    }

    #[test]
    fn test_negative_inputs_clamp() {
        assert_eq!(compute_escalation(-3, &RISK, 5), compute_escalation(0, &RISK, 5));
        assert_eq!(compute_escalation(8, &RISK, -5), compute_escalation(8, &RISK, 0));
        assert_eq!(compute_escalation(8, &RISK, -5), Escalation { last: Some(15), next: 15 });
    }

    #[test]
    fn test_saturates() {
        let esc = compute_escalation(i64::MAX, &[1], i64::MAX);
        assert_eq!(esc.last, Some(i64::MAX));
        assert_eq!(esc.next, i64::MAX);
    }

    #[test]
    fn test_schedule_not_mutated() {
        let schedule = vec![3, 1, 4];
        let before = schedule.clone();
        let _ = compute_escalation(10, &schedule, 2);
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_display() {
        assert_eq!(compute_escalation(0, &RISK, 5).to_string(), "— → 4");
        assert_eq!(compute_escalation(3, &RISK, 5).to_string(), "8 → 10");
    }
}
