//! Output formatters for timeline analysis
//!
//! Provides JSON, Table, CSV, and summary output formats.

#![allow(dead_code)]

use crate::models::{ExecutionStatus, RunSummary};
use crate::timeline::{TimelineAnalysis, WorkerLane};

/// Width of the rendered lane track in characters
const TRACK_WIDTH: usize = 40;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Analysis formatter
pub struct AnalysisFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl AnalysisFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a full timeline analysis
    pub fn format_analysis(&self, analysis: &TimelineAnalysis) -> String {
        match self.format {
            OutputFormat::Table => self.format_analysis_table(analysis),
            OutputFormat::Json => serde_json::to_string(analysis).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(analysis).unwrap_or_default(),
            OutputFormat::Csv => self.format_lanes_csv(analysis),
            OutputFormat::Summary => self.format_analysis_brief(analysis),
        }
    }

    /// Format the lane view only
    pub fn format_lanes(&self, analysis: &TimelineAnalysis) -> String {
        match self.format {
            OutputFormat::Table => self.format_lanes_table(analysis),
            OutputFormat::Json => serde_json::to_string(&analysis.lanes).unwrap_or_default(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(&analysis.lanes).unwrap_or_default()
            }
            OutputFormat::Csv => self.format_lanes_csv(analysis),
            OutputFormat::Summary => self.format_lanes_brief(analysis),
        }
    }

    /// Format a run summary
    pub fn format_run_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_run_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_run_summary_csv(summary),
            OutputFormat::Summary => format!(
                "{}/{} passed ({:.1}%) in {}ms",
                summary.passed,
                summary.total,
                summary.pass_rate(),
                summary.total_duration_ms
            ),
        }
    }

    fn format_analysis_table(&self, analysis: &TimelineAnalysis) -> String {
        let mut output = String::new();

        output.push_str("\n═══════════════════════════════════════════════════════════════\n");
        output.push_str(" Execution Timeline Analysis\n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output.push_str(&format!(
            " Max Concurrent: {} | Parallel: {} | Workers: {}\n",
            analysis.concurrency.max_concurrent,
            if analysis.concurrency.parallel {
                "yes"
            } else {
                "no"
            },
            analysis.worker_count()
        ));

        output.push_str(&format!(
            " Wall Clock: {}ms | Test Time: {}ms | Efficiency: {}\n",
            analysis.wall_clock_ms(),
            analysis.total_test_time_ms,
            self.colorize_rate(analysis.parallel_efficiency())
        ));

        if analysis.concurrency.skipped_records > 0 {
            output.push_str(&format!(
                " Skipped Records: {} (missing timestamps)\n",
                analysis.concurrency.skipped_records
            ));
        }

        output.push_str(&format!(
            " Phases (estimated): init {}ms + startup {}ms + teardown {}ms\n",
            analysis.phases.init_ms, analysis.phases.startup_ms, analysis.phases.teardown_ms
        ));

        output.push_str(" ───────────────────────────────────────────────────────────\n");
        output.push_str(&self.render_lanes(analysis));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output
    }

    fn format_lanes_table(&self, analysis: &TimelineAnalysis) -> String {
        let mut output = String::new();

        output.push_str("\n Worker Lanes\n");
        output.push_str(" ───────────────────────────────────────────────────────────\n");
        output.push_str(&self.render_lanes(analysis));

        output
    }

    fn render_lanes(&self, analysis: &TimelineAnalysis) -> String {
        let mut output = String::new();

        if analysis.lanes.is_empty() {
            output.push_str(" (no records)\n");
            return output;
        }

        for lane in &analysis.lanes {
            output.push_str(&format!(
                " {:<14} {} {} tests\n",
                truncate(&lane.worker, 14),
                render_track(lane),
                lane.entries.len()
            ));

            for entry in &lane.entries {
                let status_str = self.colorize_status(entry.record.status);
                output.push_str(&format!(
                    "   {} {:<28} [{:>6}ms] {:5.1}% → {:5.1}%\n",
                    status_str,
                    truncate(&entry.record.name, 28),
                    entry.record.effective_duration_ms(),
                    entry.position.offset_pct,
                    entry.position.offset_pct + entry.position.width_pct
                ));
            }
        }

        output
    }

    fn format_lanes_csv(&self, analysis: &TimelineAnalysis) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let header_ok = writer
            .write_record([
                "worker",
                "id",
                "name",
                "status",
                "duration_ms",
                "offset_pct",
                "width_pct",
            ])
            .is_ok();
        if !header_ok {
            return String::new();
        }

        for lane in &analysis.lanes {
            for entry in &lane.entries {
                let _ = writer.write_record([
                    lane.worker.clone(),
                    entry.record.id.clone(),
                    entry.record.name.clone(),
                    entry.record.status.to_string(),
                    entry.record.effective_duration_ms().to_string(),
                    format!("{:.3}", entry.position.offset_pct),
                    format!("{:.3}", entry.position.width_pct),
                ]);
            }
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default()
    }

    fn format_analysis_brief(&self, analysis: &TimelineAnalysis) -> String {
        format!(
            "{} max concurrent on {} workers | parallel: {} | efficiency: {:.1}% | {} skipped",
            analysis.concurrency.max_concurrent,
            analysis.worker_count(),
            if analysis.concurrency.parallel {
                "yes"
            } else {
                "no"
            },
            analysis.parallel_efficiency(),
            analysis.concurrency.skipped_records
        )
    }

    fn format_lanes_brief(&self, analysis: &TimelineAnalysis) -> String {
        analysis
            .lanes
            .iter()
            .map(|lane| format!("{}: {} tests", lane.worker, lane.entries.len()))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn format_run_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str("\n═══════════════════════════════════════════════════════════════\n");
        output.push_str(" Run Summary\n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            " Total: {} | Pass: {} | Fail: {} | Broken: {} | Skip: {} | Retried: {}\n",
            summary.total,
            summary.passed,
            summary.failed,
            summary.broken,
            summary.skipped,
            summary.retried
        ));
        if summary.unfinished > 0 {
            output.push_str(&format!(" Unfinished: {}\n", summary.unfinished));
        }
        output.push_str(&format!(
            " Pass Rate: {} | Duration: {}ms\n",
            self.colorize_rate(summary.pass_rate()),
            summary.total_duration_ms
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output
    }

    fn format_run_summary_csv(&self, summary: &RunSummary) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let _ = writer.write_record([
            "total",
            "passed",
            "failed",
            "broken",
            "skipped",
            "retried",
            "unfinished",
            "pass_rate",
            "total_duration_ms",
        ]);
        let _ = writer.write_record([
            summary.total.to_string(),
            summary.passed.to_string(),
            summary.failed.to_string(),
            summary.broken.to_string(),
            summary.skipped.to_string(),
            summary.retried.to_string(),
            summary.unfinished.to_string(),
            format!("{:.1}", summary.pass_rate()),
            summary.total_duration_ms.to_string(),
        ]);

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default()
    }

    fn colorize_rate(&self, rate: f64) -> String {
        let rate_str = format!("{rate:5.1}%");
        if !self.colorize {
            return rate_str;
        }

        if rate >= 90.0 {
            format!("\x1b[32m{rate_str}\x1b[0m")
        } else if rate >= 50.0 {
            format!("\x1b[33m{rate_str}\x1b[0m")
        } else {
            format!("\x1b[31m{rate_str}\x1b[0m")
        }
    }

    fn colorize_status(&self, status: ExecutionStatus) -> String {
        let symbol = status.symbol();
        if !self.colorize {
            return symbol.to_string();
        }

        match status {
            ExecutionStatus::Passed => format!("\x1b[32m{symbol}\x1b[0m"),
            ExecutionStatus::Failed | ExecutionStatus::Broken => {
                format!("\x1b[31m{symbol}\x1b[0m")
            }
            ExecutionStatus::Skipped | ExecutionStatus::Retried => {
                format!("\x1b[33m{symbol}\x1b[0m")
            }
            ExecutionStatus::Pending | ExecutionStatus::Running => symbol.to_string(),
        }
    }
}

impl Default for AnalysisFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Render a lane's busy spans onto a fixed-width character track
fn render_track(lane: &WorkerLane) -> String {
    let mut track = vec!['░'; TRACK_WIDTH];

    for entry in &lane.entries {
        let start = ((entry.position.offset_pct / 100.0) * TRACK_WIDTH as f64).floor() as usize;
        let end = (((entry.position.offset_pct + entry.position.width_pct) / 100.0)
            * TRACK_WIDTH as f64)
            .ceil() as usize;

        let start = start.min(TRACK_WIDTH.saturating_sub(1));
        let end = end.clamp(start + 1, TRACK_WIDTH);
        for slot in &mut track[start..end] {
            *slot = '█';
        }
    }

    track.into_iter().collect()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{prefix}...")
    }
}
