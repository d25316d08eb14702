//! File-backed append-only sinks
//!
//! Each sink keeps one append-mode handle behind a mutex and writes every
//! record or line with a single `write_all`, so concurrent callers never
//! interleave partial lines.

use crate::output::traits::{DiagnosticSink, OutputError, OutputResult, RecordSink, TokenRecord};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Opens a file for appending, creating it if needed
fn open_append(path: &Path) -> OutputResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Writes a complete buffer under the file lock
fn append_locked(file: &Mutex<File>, path: &Path, buf: &[u8]) -> OutputResult<()> {
    let mut file = file
        .lock()
        .map_err(|e| OutputError::Write(format!("Failed to lock {}: {}", path.display(), e)))?;
    file.write_all(buf)?;
    Ok(())
}

/// Token records as JSON lines, one object per line
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Opens (or creates) a JSON-lines record file for appending
    pub fn open(path: &Path) -> OutputResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(open_append(path)?),
        })
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonLinesSink {
    fn append(&self, record: &TokenRecord) -> OutputResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        append_locked(&self.file, &self.path, line.as_bytes())
    }
}

/// Plain-text diagnostic log, one line per entry
///
/// Interior CR and LF characters are written as `\r` and `\n` escapes so an
/// entry never spans several lines.
pub struct FileLineSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLineSink {
    /// Opens (or creates) a log file for appending
    pub fn open(path: &Path) -> OutputResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(open_append(path)?),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for FileLineSink {
    fn append_line(&self, line: &str) -> OutputResult<()> {
        let mut entry = line
            .trim_end_matches(['\r', '\n'])
            .replace('\r', "\\r")
            .replace('\n', "\\n");
        entry.push('\n');
        append_locked(&self.file, &self.path, entry.as_bytes())
    }
}
