//! Worker lane grouping and relative bar positioning
//!
//! Groups records into one lane per worker and maps each record onto a
//! percentage-based position inside the global execution window, for
//! consumption by lane-oriented renderers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ExecutionRecord;

/// Minimum bar width when several lanes are rendered
pub const MULTI_LANE_FLOOR_PCT: f64 = 1.0;

/// Minimum bar width in the simpler single-lane rendering
pub const SINGLE_LANE_FLOOR_PCT: f64 = 2.0;

/// Group records by worker lane.
///
/// Records without a worker id land in the `"main"` lane. Each lane is
/// sorted ascending by start time (records without a start sort first);
/// lanes are keyed lexicographically, so repeated calls on the same input
/// produce identical output. A missing finish time does not exclude a
/// record here: still-running tests keep their place in the lane.
pub fn group_by_worker(records: &[ExecutionRecord]) -> BTreeMap<String, Vec<ExecutionRecord>> {
    let mut lanes: BTreeMap<String, Vec<ExecutionRecord>> = BTreeMap::new();

    for record in records {
        lanes
            .entry(record.worker().to_string())
            .or_default()
            .push(record.clone());
    }

    for lane in lanes.values_mut() {
        lane.sort_by_key(|r| r.started_at.map(|t| t.timestamp_millis()));
    }

    lanes
}

/// Global execution window spanning all records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    /// Earliest start across all records
    pub started_at: DateTime<Utc>,

    /// Latest observed timestamp (finish, or start for open records)
    pub finished_at: DateTime<Utc>,
}

impl TimelineWindow {
    /// Compute the window, or `None` when no record carries a start time
    pub fn from_records(records: &[ExecutionRecord]) -> Option<Self> {
        let started_at = records.iter().filter_map(|r| r.started_at).min()?;
        let finished_at = records
            .iter()
            .filter_map(|r| r.finished_at.or(r.started_at))
            .max()?;

        Some(Self {
            started_at,
            finished_at,
        })
    }

    /// Wall-clock span in milliseconds
    pub fn total_ms(&self) -> u64 {
        (self.finished_at.timestamp_millis() - self.started_at.timestamp_millis()).max(0) as u64
    }
}

/// Percentage-based position of one record inside the window
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarPosition {
    /// Offset from the left edge, 0-100
    pub offset_pct: f64,

    /// Bar width, floored so near-instant records stay visible
    pub width_pct: f64,
}

impl BarPosition {
    /// Locate a record inside the window.
    ///
    /// A zero-length window (all records at the same instant) maps
    /// everything to `0/0` rather than dividing by zero. Records without a
    /// start time sit at the left edge.
    pub fn locate(record: &ExecutionRecord, window: &TimelineWindow, floor_pct: f64) -> Self {
        let total_ms = window.total_ms();
        if total_ms == 0 {
            return Self {
                offset_pct: 0.0,
                width_pct: 0.0,
            };
        }

        let offset_pct = record
            .started_at
            .map(|start| {
                (start.timestamp_millis() - window.started_at.timestamp_millis()) as f64
                    / total_ms as f64
                    * 100.0
            })
            .unwrap_or(0.0);

        let width_pct =
            (record.effective_duration_ms() as f64 / total_ms as f64 * 100.0).max(floor_pct);

        Self {
            offset_pct,
            width_pct,
        }
    }
}
