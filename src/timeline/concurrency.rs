//! Concurrency inference over execution intervals
//!
//! Sweep-line interval-overlap counting and parallel-execution detection.
//! All functions are pure and total: records missing a timestamp are
//! excluded rather than rejected, and empty input degrades to zero/false.

use serde::{Deserialize, Serialize};

use crate::models::ExecutionRecord;

/// Concurrency metrics derived from record timestamps
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcurrencyStats {
    /// Maximum number of tests running at any instant
    pub max_concurrent: usize,

    /// Whether any two tests overlapped in time
    pub parallel: bool,

    /// Records excluded from the interval math for missing timestamps
    pub skipped_records: usize,
}

impl ConcurrencyStats {
    pub fn from_records(records: &[ExecutionRecord]) -> Self {
        Self {
            max_concurrent: max_concurrent(records),
            parallel: detect_parallel(records),
            skipped_records: skipped_records(records),
        }
    }
}

/// Number of records that cannot participate in interval math
pub fn skipped_records(records: &[ExecutionRecord]) -> usize {
    records.iter().filter(|r| !r.has_interval()).count()
}

/// Maximum number of tests running concurrently at any instant.
///
/// Classic sweep-line: every complete record emits a `+1` event at its start
/// and a `-1` event at its end; events are swept in timestamp order while
/// tracking the peak of a running counter. At equal timestamps end events
/// sort before start events, so a test that ends exactly when another starts
/// does not count as overlapping.
pub fn max_concurrent(records: &[ExecutionRecord]) -> usize {
    let mut events: Vec<(i64, i8)> = Vec::with_capacity(records.len() * 2);

    for record in records {
        if let (Some(start), Some(end)) = (record.started_at, record.finished_at) {
            events.push((start.timestamp_millis(), 1));
            events.push((end.timestamp_millis(), -1));
        }
    }

    events.sort_unstable();

    let mut running: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        running += i64::from(delta);
        peak = peak.max(running);
    }

    peak as usize
}

/// Whether execution was parallel: true iff some record was still running
/// when the next one (in start order) began.
///
/// Scanning adjacent pairs is sufficient: in start order, a record that
/// overlaps any later record also overlaps its immediate successor.
pub fn detect_parallel(records: &[ExecutionRecord]) -> bool {
    let mut intervals: Vec<(i64, i64)> = records
        .iter()
        .filter_map(|r| match (r.started_at, r.finished_at) {
            (Some(start), Some(end)) => Some((start.timestamp_millis(), end.timestamp_millis())),
            _ => None,
        })
        .collect();

    if intervals.len() < 2 {
        return false;
    }

    intervals.sort_unstable();

    intervals
        .windows(2)
        .any(|pair| pair[0].1 > pair[1].0)
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

    #[test]
    fn test_empty_input() {
        assert_eq!(max_concurrent(&[]), 0);
        assert!(!detect_parallel(&[]));
    }

    #[test]
    fn test_single_record() {
        let records = vec![record("1", "t1", 0, 100)];
        assert_eq!(max_concurrent(&records), 1);
        assert!(!detect_parallel(&records));
    }

    #[test]
    fn test_overlapping_pair() {
        // Scenario: t=0..100 and t=50..150 overlap for 50ms
        let records = vec![record("1", "t1", 0, 100), record("2", "t2", 50, 100)];
        assert_eq!(max_concurrent(&records), 2);
        assert!(detect_parallel(&records));
    }

    #[test]
    fn test_back_to_back_does_not_overlap() {
        // End of the first coincides with the start of the second
        let records = vec![record("1", "t1", 0, 100), record("2", "t1", 100, 100)];
        assert_eq!(max_concurrent(&records), 1);
        assert!(!detect_parallel(&records));
    }

    #[test]
    fn test_identical_intervals_all_concurrent() {
        let records: Vec<ExecutionRecord> = (0..5)
            .map(|i| record(&i.to_string(), "t1", 1000, 250))
            .collect();
        assert_eq!(max_concurrent(&records), 5);
        assert!(detect_parallel(&records));
    }

    #[test]
    fn test_disjoint_intervals_are_sequential() {
        let records = vec![
            record("1", "t1", 0, 50),
            record("2", "t1", 100, 50),
            record("3", "t1", 200, 50),
        ];
        assert_eq!(max_concurrent(&records), 1);
        assert!(!detect_parallel(&records));
    }

    #[test]
    fn test_non_adjacent_overlap_detected() {
        // First record spans the whole window, covering the third as well
        let records = vec![
            record("1", "t1", 0, 1000),
            record("2", "t2", 100, 50),
            record("3", "t3", 400, 50),
        ];
        assert!(detect_parallel(&records));
        assert_eq!(max_concurrent(&records), 2);
    }

    #[test]
    fn test_bounded_by_record_count() {
        let records = vec![
            record("1", "t1", 0, 300),
            record("2", "t2", 100, 300),
            record("3", "t3", 200, 300),
        ];
        let max = max_concurrent(&records);
        assert!(max >= 1 && max <= records.len());
        assert_eq!(max, 3);
    }

    #[test]
    fn test_open_records_are_skipped_and_counted() {
        let mut records = vec![record("1", "t1", 0, 100), record("2", "t2", 50, 100)];
        records.push(
            ExecutionRecord::new("3", "still running")
                .with_status(ExecutionStatus::Running)
                .with_start(ts(10)),
        );
        records.push(ExecutionRecord::new("4", "never started"));

        let stats = ConcurrencyStats::from_records(&records);
        assert_eq!(stats.max_concurrent, 2);
        assert!(stats.parallel);
        assert_eq!(stats.skipped_records, 2);
    }

    #[test]
    fn test_zero_duration_records_collapse() {
        // With end-before-start ordering, instantaneous records at the same
        // timestamp never appear concurrent.
        let records = vec![record("1", "t1", 500, 0), record("2", "t2", 500, 0)];
        assert_eq!(max_concurrent(&records), 0);
        assert!(!detect_parallel(&records));
    }

    #[test]
    fn test_determinism() {
        let records = vec![
            record("1", "t2", 300, 200),
            record("2", "t1", 0, 400),
            record("3", "t1", 450, 100),
        ];
        let first = ConcurrencyStats::from_records(&records);
        let second = ConcurrencyStats::from_records(&records);
        assert_eq!(first, second);
    }
}
