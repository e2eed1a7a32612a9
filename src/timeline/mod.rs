//! Timeline reconstruction engine
//!
//! Infers, after the fact, how a test run was scheduled: maximum
//! concurrency, per-worker lanes, and coarse phase estimates, all from
//! record timestamps alone.

mod analyzer;
mod concurrency;
mod lanes;
mod phases;

pub use analyzer::{LaneEntry, TimelineAnalysis, WorkerLane};
pub use concurrency::{detect_parallel, max_concurrent, skipped_records, ConcurrencyStats};
pub use lanes::{
    group_by_worker, BarPosition, TimelineWindow, MULTI_LANE_FLOOR_PCT, SINGLE_LANE_FLOOR_PCT,
};
pub use phases::{PhaseConfig, ResourcePhases};
