//! Coarse resource-phase duration estimates
//!
//! These numbers are UI-decoration estimates, not measurements: framework
//! bootstrap and teardown are not observable from record timestamps at all,
//! so they default to fixed placeholders that a caller who has measured the
//! real values can override through [`PhaseConfig`]. Only the startup
//! estimate is derived from the records themselves.

use serde::{Deserialize, Serialize};

use crate::models::ExecutionRecord;

/// Tunable placeholders for the unobservable phases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Assumed framework bootstrap time
    pub init_ms: u64,

    /// Assumed teardown time
    pub teardown_ms: u64,

    /// Upper bound on the derived startup estimate
    pub startup_cap_ms: u64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            init_ms: 2000,
            teardown_ms: 1000,
            startup_cap_ms: 5000,
        }
    }
}

/// Estimated phase durations in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePhases {
    pub init_ms: u64,
    pub startup_ms: u64,
    pub teardown_ms: u64,
}

impl ResourcePhases {
    /// Estimate phases from a record collection.
    ///
    /// `startup` is the excess time the first test (in start order) took
    /// over the average of the remaining tests, attributed to lazy
    /// environment startup and clamped to `[0, startup_cap_ms]`. A single
    /// record has nothing to compare against and yields `startup = 0`.
    pub fn estimate(records: &[ExecutionRecord], config: &PhaseConfig) -> Self {
        Self {
            init_ms: config.init_ms,
            startup_ms: estimate_startup(records, config.startup_cap_ms),
            teardown_ms: config.teardown_ms,
        }
    }
}

fn estimate_startup(records: &[ExecutionRecord], cap_ms: u64) -> u64 {
    let mut timed: Vec<&ExecutionRecord> =
        records.iter().filter(|r| r.started_at.is_some()).collect();
    timed.sort_by_key(|r| r.started_at.map(|t| t.timestamp_millis()));

    let Some((first, rest)) = timed.split_first() else {
        return 0;
    };
    if rest.is_empty() {
        return 0;
    }

    let first_ms = first.effective_duration_ms() as f64;
    let rest_avg_ms = rest
        .iter()
        .map(|r| r.effective_duration_ms() as f64)
        .sum::<f64>()
        / rest.len() as f64;

    (first_ms - rest_avg_ms).clamp(0.0, cap_ms as f64) as u64
}
