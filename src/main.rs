//! timelane - Test Execution Timeline Analysis Tool
//!
//! A CLI tool that reconstructs how a test run was scheduled from the
//! timing metadata its runner recorded: maximum concurrency, a parallel
//! verdict, per-worker lanes, and coarse resource-phase estimates.
//!
//! ## Usage
//!
//! ```bash
//! # Full analysis of a record snapshot
//! timelane analyze run.json
//!
//! # Lane view as CSV
//! timelane lanes run.json --format csv
//!
//! # Status aggregation with phase overrides from a config file
//! timelane summary run.json --config timelane.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod input;
mod models;
mod output;
mod timeline;
mod utils;

use cli::{Args, Command, ViewArgs};
use config::AppConfig;
use models::{ExecutionRecord, RunSummary};
use output::{AnalysisFormatter, OutputFormat};
use timeline::TimelineAnalysis;
use utils::{init_logger, LogLevel};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&args.log_level).unwrap_or(LogLevel::Info)
    };
    init_logger(level);

    match args.command {
        Command::Analyze(view) => run_analyze(view)?,
        Command::Lanes(view) => run_lanes(view)?,
        Command::Summary(view) => run_summary(view)?,
    }

    Ok(())
}

fn run_analyze(view: ViewArgs) -> Result<()> {
    let (config, formatter, records) = load_context(&view)?;

    let analysis = TimelineAnalysis::analyze_with(&records, &config.phases);
    info!(
        "Analysis complete: max {} concurrent across {} workers",
        analysis.concurrency.max_concurrent,
        analysis.worker_count()
    );

    println!("{}", formatter.format_analysis(&analysis));
    Ok(())
}

fn run_lanes(view: ViewArgs) -> Result<()> {
    let (config, formatter, records) = load_context(&view)?;

    let analysis = TimelineAnalysis::analyze_with(&records, &config.phases);
    println!("{}", formatter.format_lanes(&analysis));
    Ok(())
}

fn run_summary(view: ViewArgs) -> Result<()> {
    let (_, formatter, records) = load_context(&view)?;

    let summary = RunSummary::new(&records);
    println!("{}", formatter.format_run_summary(&summary));
    Ok(())
}

/// Resolve config, formatter, and records for a view command
fn load_context(view: &ViewArgs) -> Result<(AppConfig, AnalysisFormatter, Vec<ExecutionRecord>)> {
    let config = match &view.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let format_str = view.format.as_deref().unwrap_or(&config.default_format);
    let format = OutputFormat::from_str(format_str)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {format_str}"))?;

    let mut formatter = AnalysisFormatter::new(format);
    if view.no_color || config.no_color {
        formatter = formatter.no_color();
    }

    let records = input::load_records(&view.records)?;
    info!("Loaded {} records from {}", records.len(), view.records);

    Ok((config, formatter, records))
}
