//! Escalating reward schedules.
//!
//! A schedule lists the reward for the 1st, 2nd, 3rd, ... occurrence of an
//! event (a Risk card set turned in, for example). Once the schedule runs
//! out, every further occurrence adds a flat `step` to the final entry.
//!
//! ```
//! use bgt_tracker::escalation::{compute_escalation, Escalation};
//!
//! let risk = [4, 6, 8, 10, 12, 15];
//! assert_eq!(compute_escalation(0, &risk, 5), Escalation { last: None, next: 4 });
//! assert_eq!(compute_escalation(6, &risk, 5), Escalation { last: Some(15), next: 20 });
//! assert_eq!(compute_escalation(8, &risk, 5), Escalation { last: Some(25), next: 30 });
//! ```

mod compute;
mod schedule;

pub use compute::{compute_escalation, Escalation};
pub use schedule::{Schedule, ScheduleRule};
