//! Record snapshot loading
//!
//! Reads the JSON snapshot of execution records handed off by an external
//! test runner. Accepts either a bare array or a `{"records": [...]}`
//! envelope, since both shapes occur in the wild.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::ExecutionRecord;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read records file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse records file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RecordEnvelope {
    records: Vec<ExecutionRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Bare(Vec<ExecutionRecord>),
    Envelope(RecordEnvelope),
}

/// Load execution records from a JSON snapshot file
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ExecutionRecord>, InputError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    let records = match snapshot {
        Snapshot::Bare(records) => records,
        Snapshot::Envelope(envelope) => envelope.records,
    };

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
