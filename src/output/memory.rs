//! In-process sinks
//!
//! `MemorySink` collects everything it receives, for library callers that
//! post-process records themselves. `NullSink` discards everything.

use crate::output::traits::{DiagnosticSink, OutputError, OutputResult, RecordSink, TokenRecord};
use std::sync::{Mutex, PoisonError};

/// Collects records and diagnostic lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<TokenRecord>>,
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far
    ///
    /// A lock poisoned by a panicking writer still yields what was stored.
    pub fn records(&self) -> Vec<TokenRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the diagnostic lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordSink for MemorySink {
    fn append(&self, record: &TokenRecord) -> OutputResult<()> {
        self.records
            .lock()
            .map_err(|e| OutputError::Write(format!("Failed to lock records: {}", e)))?
            .push(record.clone());
        Ok(())
    }
}

impl DiagnosticSink for MemorySink {
    fn append_line(&self, line: &str) -> OutputResult<()> {
        self.lines
            .lock()
            .map_err(|e| OutputError::Write(format!("Failed to lock lines: {}", e)))?
            .push(line.to_string());
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn append(&self, _record: &TokenRecord) -> OutputResult<()> {
        Ok(())
    }
}

impl DiagnosticSink for NullSink {
    fn append_line(&self, _line: &str) -> OutputResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        sink.append(&TokenRecord::new("http://a.edu/", "a.edu", vec![]))
            .unwrap();
        sink.append_line("hello").unwrap();

        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.lines(), vec!["hello"]);
    }

    #[test]
    fn test_snapshot_survives_poisoned_lock() {
        let sink = Arc::new(MemorySink::new());
        sink.append(&TokenRecord::new("http://a.edu/", "a.edu", vec![]))
            .unwrap();
        sink.append_line("kept").unwrap();

        let writer = Arc::clone(&sink);
        let result = thread::spawn(move || {
            let _records = writer.records.lock().unwrap();
            let _lines = writer.lines.lock().unwrap();
            panic!("writer failed while holding the locks");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.lines(), vec!["kept"]);
    }

    #[test]
    fn test_concurrent_appends() {
        let sink = Arc::new(MemorySink::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for j in 0..50 {
                        sink.append_line(&format!("{}-{}", i, j)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.lines().len(), 400);
    }
}
