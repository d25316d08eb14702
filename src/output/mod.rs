//! Output module for token records and diagnostic lines
//!
//! This module handles:
//! - The append-only sink traits the page processor writes to
//! - File, SQLite and in-memory sink implementations
//! - Statistics over collected records

mod file_sink;
mod memory;
mod sqlite_output;
pub mod stats;
mod traits;

pub use file_sink::{FileLineSink, JsonLinesSink};
pub use memory::{MemorySink, NullSink};
pub use sqlite_output::SqliteRecordSink;
pub use stats::{load_statistics, print_statistics, RecordStatistics};
pub use traits::{DiagnosticSink, OutputError, OutputResult, RecordSink, TokenRecord};

use crate::config::{OutputConfig, RecordsFormat};
use std::path::Path;

/// Opens the record sink described by the output configuration
///
/// # Arguments
///
/// * `config` - The output configuration
///
/// # Returns
///
/// * `Ok(Box<dyn RecordSink>)` - A JSON-lines or SQLite sink
/// * `Err(OutputError)` - The record file could not be opened
pub fn open_record_sink(config: &OutputConfig) -> OutputResult<Box<dyn RecordSink>> {
    let path = Path::new(&config.records_path);
    match config.records_format {
        RecordsFormat::Jsonl => Ok(Box::new(JsonLinesSink::open(path)?)),
        RecordsFormat::Sqlite => Ok(Box::new(SqliteRecordSink::new(path)?)),
    }
}

/// Opens the diagnostic log described by the output configuration
pub fn open_diagnostic_sink(config: &OutputConfig) -> OutputResult<FileLineSink> {
    FileLineSink::open(Path::new(&config.log_path))
}
