//! Execution record models for timeline analysis
//!
//! Defines execution records, statuses, and run summaries.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker lane assigned to records that carry no worker id
pub const DEFAULT_WORKER: &str = "main";

/// Execution status reported by the upstream test runner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Broken,
    Skipped,
    Retried,
}

impl ExecutionStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "…",
            ExecutionStatus::Running => "▶",
            ExecutionStatus::Passed => "✓",
            ExecutionStatus::Failed => "✗",
            ExecutionStatus::Broken => "!",
            ExecutionStatus::Skipped => "○",
            ExecutionStatus::Retried => "↻",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Passed)
    }

    /// Whether the runner has finished with this record
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionStatus::Pending | ExecutionStatus::Running)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Pending => write!(f, "PENDING"),
            ExecutionStatus::Running => write!(f, "RUNNING"),
            ExecutionStatus::Passed => write!(f, "PASSED"),
            ExecutionStatus::Failed => write!(f, "FAILED"),
            ExecutionStatus::Broken => write!(f, "BROKEN"),
            ExecutionStatus::Skipped => write!(f, "SKIPPED"),
            ExecutionStatus::Retried => write!(f, "RETRIED"),
        }
    }
}

/// One test's timing and result metadata, produced by an external runner.
///
/// Records are immutable inputs to the timeline analysis. `duration_ms` is
/// stored independently by some runners and may disagree with
/// `finished_at - started_at`; interval math uses only the timestamps while
/// bar widths use [`ExecutionRecord::effective_duration_ms`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Opaque unique identifier
    pub id: String,

    /// Human-readable test name
    pub name: String,

    /// Runner-reported status
    pub status: ExecutionStatus,

    /// Worker lane the test ran in, when the runner reports one
    pub worker_id: Option<String>,

    /// Wall-clock start timestamp
    pub started_at: Option<DateTime<Utc>>,

    /// Wall-clock end timestamp; absent while the test is still running
    pub finished_at: Option<DateTime<Utc>>,

    /// Runner-reported elapsed time
    pub duration_ms: Option<u64>,

    /// Failure message or skip reason
    pub message: Option<String>,
}

impl ExecutionRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ExecutionStatus::Pending,
            worker_id: None,
            started_at: None,
            finished_at: None,
            duration_ms: None,
            message: None,
        }
    }

    pub fn with_status(mut self, status: ExecutionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_worker(mut self, worker_id: impl Into<String>) -> Self {
        self.worker_id = Some(worker_id.into());
        self
    }

    pub fn with_interval(mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self.finished_at = Some(finished_at);
        self
    }

    pub fn with_start(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Worker lane, defaulting to [`DEFAULT_WORKER`]
    pub fn worker(&self) -> &str {
        self.worker_id.as_deref().unwrap_or(DEFAULT_WORKER)
    }

    /// Whether both timestamps are present
    pub fn has_interval(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_some()
    }

    /// Elapsed time for rendering: the stored duration when present,
    /// otherwise derived from the timestamps, otherwise 0.
    pub fn effective_duration_ms(&self) -> u64 {
        if let Some(ms) = self.duration_ms {
            return ms;
        }
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => {
                (end.timestamp_millis() - start.timestamp_millis()).max(0) as u64
            }
            _ => 0,
        }
    }
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms] @{}",
            self.status.symbol(),
            self.name,
            self.effective_duration_ms(),
            self.worker()
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Status aggregation over a record collection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub broken: usize,
    pub skipped: usize,
    pub retried: usize,
    pub unfinished: usize,
    pub total_duration_ms: u64,
}

impl RunSummary {
    pub fn new(records: &[ExecutionRecord]) -> Self {
        let count = |s: ExecutionStatus| records.iter().filter(|r| r.status == s).count();

        Self {
            total: records.len(),
            passed: count(ExecutionStatus::Passed),
            failed: count(ExecutionStatus::Failed),
            broken: count(ExecutionStatus::Broken),
            skipped: count(ExecutionStatus::Skipped),
            retried: count(ExecutionStatus::Retried),
            unfinished: records.iter().filter(|r| !r.status.is_terminal()).count(),
            total_duration_ms: records.iter().map(|r| r.effective_duration_ms()).sum(),
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Broken: {} | Skip: {} | Retried: {}",
            self.total, self.passed, self.failed, self.broken, self.skipped, self.retried
        )?;
        write!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_worker_defaults_to_main() {
        let record = ExecutionRecord::new("1", "login test");
        assert_eq!(record.worker(), "main");

        let record = record.with_worker("pool-2-thread-1");
        assert_eq!(record.worker(), "pool-2-thread-1");
    }

    #[test]
    fn test_effective_duration_prefers_stored_value() {
        let record = ExecutionRecord::new("1", "t")
            .with_interval(ts(0), ts(500))
            .with_duration_ms(42);
        assert_eq!(record.effective_duration_ms(), 42);
    }

    #[test]
    fn test_effective_duration_derived_from_timestamps() {
        let record = ExecutionRecord::new("1", "t").with_interval(ts(100), ts(350));
        assert_eq!(record.effective_duration_ms(), 250);

        let open = ExecutionRecord::new("2", "t").with_start(ts(100));
        assert_eq!(open.effective_duration_ms(), 0);
    }

    #[test]
    fn test_has_interval() {
        let record = ExecutionRecord::new("1", "t").with_start(ts(0));
        assert!(!record.has_interval());
        assert!(record.with_interval(ts(0), ts(1)).has_interval());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ExecutionStatus::Pending.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Passed.is_terminal());
        assert!(ExecutionStatus::Retried.is_terminal());
    }

    #[test]
    fn test_run_summary_counts() {
        let records = vec![
            ExecutionRecord::new("1", "a")
                .with_status(ExecutionStatus::Passed)
                .with_duration_ms(100),
            ExecutionRecord::new("2", "b")
                .with_status(ExecutionStatus::Failed)
                .with_duration_ms(50)
                .with_message("assertion failed"),
            ExecutionRecord::new("3", "c").with_status(ExecutionStatus::Skipped),
            ExecutionRecord::new("4", "d").with_status(ExecutionStatus::Running),
        ];

        let summary = RunSummary::new(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.total_duration_ms, 150);
        assert_eq!(summary.pass_rate(), 25.0);
    }

    #[test]
    fn test_run_summary_empty() {
        let summary = RunSummary::new(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate(), 0.0);
    }

    #[test]
    fn test_record_serde_roundtrip_with_missing_fields() {
        let json = r#"{"id":"7","name":"checkout","status":"passed"}"#;
        let record: ExecutionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, ExecutionStatus::Passed);
        assert!(record.worker_id.is_none());
        assert!(record.started_at.is_none());
    }
}
