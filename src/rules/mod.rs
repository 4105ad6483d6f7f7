//! State transitions.
//!
//! The tracker never mutates a `GameState` in place. Each `Action` is
//! applied by `apply`, which returns the next record:
//! - Seat, phase and turn navigation
//! - Counter adjustments with bound clamping
//! - Restarts and seat-count changes

pub mod engine;

pub use engine::apply;
