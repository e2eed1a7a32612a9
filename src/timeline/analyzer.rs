//! One-shot timeline analysis
//!
//! Ties the concurrency, lane, and phase computations together into a
//! single snapshot consumed by the output formatters.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::ExecutionRecord;
use crate::timeline::concurrency::ConcurrencyStats;
use crate::timeline::lanes::{
    group_by_worker, BarPosition, TimelineWindow, MULTI_LANE_FLOOR_PCT, SINGLE_LANE_FLOOR_PCT,
};
use crate::timeline::phases::{PhaseConfig, ResourcePhases};

/// One record placed inside its lane
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaneEntry {
    pub record: ExecutionRecord,
    pub position: BarPosition,
}

/// One horizontal lane per worker, entries in start order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerLane {
    pub worker: String,
    pub entries: Vec<LaneEntry>,
}

/// Complete analysis of a record collection.
///
/// Pure function of its input: the same records always produce the same
/// analysis, lane order included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineAnalysis {
    pub concurrency: ConcurrencyStats,

    /// Global execution window; `None` when no record carries a start time
    pub window: Option<TimelineWindow>,

    pub phases: ResourcePhases,

    /// Lanes keyed lexicographically by worker
    pub lanes: Vec<WorkerLane>,

    /// Sum of per-record durations across the whole run
    pub total_test_time_ms: u64,
}

impl TimelineAnalysis {
    pub fn analyze(records: &[ExecutionRecord]) -> Self {
        Self::analyze_with(records, &PhaseConfig::default())
    }

    pub fn analyze_with(records: &[ExecutionRecord], phase_config: &PhaseConfig) -> Self {
        let concurrency = ConcurrencyStats::from_records(records);
        let window = TimelineWindow::from_records(records);
        let phases = ResourcePhases::estimate(records, phase_config);
        let grouped = group_by_worker(records);

        let floor_pct = if grouped.len() > 1 {
            MULTI_LANE_FLOOR_PCT
        } else {
            SINGLE_LANE_FLOOR_PCT
        };

        let lanes = grouped
            .into_iter()
            .map(|(worker, lane_records)| WorkerLane {
                worker,
                entries: lane_records
                    .into_iter()
                    .map(|record| {
                        let position = match &window {
                            Some(window) => BarPosition::locate(&record, window, floor_pct),
                            None => BarPosition {
                                offset_pct: 0.0,
                                width_pct: 0.0,
                            },
                        };
                        LaneEntry { record, position }
                    })
                    .collect(),
            })
            .collect();

        let total_test_time_ms = records.iter().map(|r| r.effective_duration_ms()).sum();

        Self {
            concurrency,
            window,
            phases,
            lanes,
            total_test_time_ms,
        }
    }

    /// Wall-clock span of the run in milliseconds
    pub fn wall_clock_ms(&self) -> u64 {
        self.window.map(|w| w.total_ms()).unwrap_or(0)
    }

    /// Number of distinct worker lanes
    pub fn worker_count(&self) -> usize {
        self.lanes.len()
    }

    /// How well the run saturated its observed concurrency:
    /// `sum(durations) / (wall_clock * max_concurrent) * 100`.
    ///
    /// 0 when the run has no measurable wall-clock span or concurrency.
    pub fn parallel_efficiency(&self) -> f64 {
        let wall_ms = self.wall_clock_ms();
        if wall_ms == 0 || self.concurrency.max_concurrent == 0 {
            return 0.0;
        }
        self.total_test_time_ms as f64
            / (wall_ms as f64 * self.concurrency.max_concurrent as f64)
            * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn record(id: &str, worker: &str, start_ms: i64, duration_ms: i64) -> ExecutionRecord {
        ExecutionRecord::new(id, format!("test {id}"))
            .with_status(ExecutionStatus::Passed)
            .with_worker(worker)
            .with_interval(ts(start_ms), ts(start_ms + duration_ms))
    }

    fn two_worker_run() -> Vec<ExecutionRecord> {
        vec![
            record("1", "t1", 0, 400),
            record("2", "t2", 100, 400),
            record("3", "t1", 400, 200),
            record("4", "t2", 500, 300),
            record("5", "t1", 600, 200),
        ]
    }

    #[test]
    fn test_analysis_shape() {
        let analysis = TimelineAnalysis::analyze(&two_worker_run());

        assert_eq!(analysis.concurrency.max_concurrent, 2);
        assert!(analysis.concurrency.parallel);
        assert_eq!(analysis.concurrency.skipped_records, 0);
        assert_eq!(analysis.worker_count(), 2);
        assert_eq!(analysis.lanes[0].worker, "t1");
        assert_eq!(analysis.lanes[1].worker, "t2");
        assert_eq!(analysis.lanes[0].entries.len(), 3);
        assert_eq!(analysis.lanes[1].entries.len(), 2);
        assert_eq!(analysis.wall_clock_ms(), 800);
        assert_eq!(analysis.total_test_time_ms, 1500);
    }

    #[test]
    fn test_parallel_efficiency() {
        let analysis = TimelineAnalysis::analyze(&two_worker_run());

        // 1500ms of test time inside an 800ms window on 2 lanes
        let expected = 1500.0 / (800.0 * 2.0) * 100.0;
        assert!((analysis.parallel_efficiency() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let analysis = TimelineAnalysis::analyze(&[]);

        assert_eq!(analysis.concurrency.max_concurrent, 0);
        assert!(!analysis.concurrency.parallel);
        assert!(analysis.window.is_none());
        assert!(analysis.lanes.is_empty());
        assert_eq!(analysis.parallel_efficiency(), 0.0);
    }

    #[test]
    fn test_single_lane_uses_wider_floor() {
        let records = vec![record("1", "t1", 0, 10_000), record("2", "t1", 10_000, 1)];
        let analysis = TimelineAnalysis::analyze(&records);

        assert_eq!(analysis.worker_count(), 1);
        let tiny = &analysis.lanes[0].entries[1];
        assert_eq!(tiny.position.width_pct, SINGLE_LANE_FLOOR_PCT);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let records = two_worker_run();
        let a = serde_json::to_string(&TimelineAnalysis::analyze(&records)).unwrap();
        let b = serde_json::to_string(&TimelineAnalysis::analyze(&records)).unwrap();
        assert_eq!(a, b);
    }
}
