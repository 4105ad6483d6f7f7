//! Escalation calculator properties.
//!
//! These check the calculator's contract over arbitrary counts, schedules
//! and steps rather than a handful of fixed points.

use bgt_tracker::{compute_escalation, Escalation, ScheduleRule};
use proptest::prelude::*;

const RISK: [i64; 6] = [4, 6, 8, 10, 12, 15];

fn schedules() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..1_000, 0..12)
}

proptest! {
    /// The next reward at count c is the last reward at count c+1.
    #[test]
    fn next_becomes_last(count in 0i64..10_000, schedule in schedules(), step in 0i64..1_000) {
        let now = compute_escalation(count, &schedule, step);
        let after = compute_escalation(count + 1, &schedule, step);
        prop_assert_eq!(after.last, Some(now.next));
    }

    #[test]
    fn zero_count_never_has_last(schedule in schedules(), step in 0i64..1_000) {
        prop_assert_eq!(compute_escalation(0, &schedule, step).last, None);
    }

    #[test]
    fn empty_schedule_starts_at_step(step in 0i64..1_000) {
        prop_assert_eq!(compute_escalation(0, &[], step).next, step);
    }

    #[test]
    fn negative_inputs_behave_as_zero(count in -10_000i64..0, schedule in schedules(), step in -1_000i64..0) {
        prop_assert_eq!(compute_escalation(count, &schedule, 7), compute_escalation(0, &schedule, 7));
        prop_assert_eq!(compute_escalation(3, &schedule, step), compute_escalation(3, &schedule, 0));
    }

    #[test]
    fn repeated_calls_agree(count in 0i64..100, schedule in schedules(), step in 0i64..100) {
        let first = compute_escalation(count, &schedule, step);
        for _ in 0..3 {
            prop_assert_eq!(compute_escalation(count, &schedule, step), first);
        }
    }

    /// Inside the schedule, rewards are read straight from it.
    #[test]
    fn inside_schedule_reads_slots(schedule in prop::collection::vec(1i64..1_000, 1..12), step in 0i64..100) {
        for count in 1..=schedule.len() {
            let esc = compute_escalation(count as i64, &schedule, step);
            prop_assert_eq!(esc.last, Some(schedule[count - 1]));
        }
    }

    /// Past the schedule, rewards grow by exactly `step` per occurrence.
    #[test]
    fn past_schedule_grows_by_step(schedule in schedules(), step in 0i64..100, extra in 0i64..50) {
        let len = schedule.len() as i64;
        let esc = compute_escalation(len + extra, &schedule, step);
        prop_assert_eq!(esc.next - esc.last.unwrap_or(0), step);
    }
}

#[test]
fn test_documented_points() {
    assert_eq!(compute_escalation(0, &[4, 6, 8], 5).next, 4);
    assert_eq!(compute_escalation(3, &RISK, 5), Escalation { last: Some(8), next: 10 });
    assert_eq!(compute_escalation(6, &RISK, 5), Escalation { last: Some(15), next: 20 });
    assert_eq!(compute_escalation(8, &RISK, 5), Escalation { last: Some(25), next: 30 });
}

#[test]
fn test_risk_rule_table() {
    let rule = ScheduleRule::risk_cards();
    let nexts: Vec<i64> = (0..10).map(|c| rule.at(c).next).collect();
    assert_eq!(nexts, vec![4, 6, 8, 10, 12, 15, 20, 25, 30, 35]);
}
