//! Data models for timeline analysis
//!
//! This module contains all data structures used throughout the application.

mod record;

pub use record::{ExecutionRecord, ExecutionStatus, RunSummary, DEFAULT_WORKER};
