//! Output formatting module
//!
//! Provides various output formats for timeline analysis results.

mod formatter;

pub use formatter::{AnalysisFormatter, OutputFormat};
