//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Test execution timeline analysis tool
#[derive(Parser, Debug)]
#[command(name = "timelane")]
#[command(version = "0.1.0")]
#[command(about = "Analyze test execution timelines and infer run concurrency")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full timeline analysis: concurrency, efficiency, phases, lanes
    Analyze(ViewArgs),

    /// Per-worker lane view only
    Lanes(ViewArgs),

    /// Status aggregation over the record collection
    Summary(ViewArgs),
}

/// Arguments shared by the view commands
#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// Path to the execution record snapshot (JSON)
    pub records: String,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Configuration file (JSON or YAML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}
