//! Fare rules.
//!
//! Base fares come from the trip planner when it supplies them and from a
//! distance-banded suburban tariff otherwise. The last-mile rewrite then
//! prices a motorised final leg on top of the base fare.

mod estimate;
mod last_mile;

pub use estimate::estimate_fare;
pub use last_mile::{LastMileOutcome, adjust_last_mile, round_rupees};
