//! Shared utilities
//!
//! Logging configuration helpers.

mod logger;

pub use logger::{init_logger, LogLevel};
