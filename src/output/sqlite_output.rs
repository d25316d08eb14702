//! SQLite-based record sink
//!
//! This module stores token records in a SQLite database instead of a
//! JSON-lines file, for crawls that want to query records afterwards.

use crate::output::traits::{OutputError, OutputResult, RecordSink, TokenRecord};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// SQL schema for the record database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS token_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    subdomain TEXT NOT NULL,
    word_count INTEGER NOT NULL,
    tokens TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_token_records_url ON token_records(url);
CREATE INDEX IF NOT EXISTS idx_token_records_subdomain ON token_records(subdomain);
"#;

/// SQLite record sink
///
/// Tokens are stored as a JSON array; `recorded_at` is an RFC 3339 timestamp.
pub struct SqliteRecordSink {
    conn: Mutex<Connection>,
}

impl SqliteRecordSink {
    /// Opens or creates a record database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn new(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory record database
    pub fn new_in_memory() -> OutputResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> OutputResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| OutputError::Write(format!("Failed to lock record database: {}", e)))
    }

    /// Counts stored records
    pub fn count_records(&self) -> OutputResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM token_records", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Loads every stored record in insertion order
    pub fn records(&self) -> OutputResult<Vec<TokenRecord>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT url, subdomain, tokens FROM token_records ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (url, subdomain, tokens) = row?;
            let tokens: Vec<String> = serde_json::from_str(&tokens)?;
            records.push(TokenRecord::new(url, subdomain, tokens));
        }

        Ok(records)
    }
}

impl RecordSink for SqliteRecordSink {
    fn append(&self, record: &TokenRecord) -> OutputResult<()> {
        let tokens = serde_json::to_string(record.tokens())?;
        let now = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO token_records (url, subdomain, word_count, tokens, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.url(),
                record.subdomain(),
                record.word_count() as i64,
                tokens,
                now
            ],
        )?;

        Ok(())
    }
}
