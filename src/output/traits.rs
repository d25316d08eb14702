//! Output sink traits and types
//!
//! This module defines the append-only sink interfaces the page processor
//! writes to, and the token record they carry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Token analysis of one successfully fetched HTML page
///
/// Serialized as `{"url", "subdomain", "word_count", "tokens"}`. Deserializing
/// rejects a `word_count` that differs from the number of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTokenRecord")]
pub struct TokenRecord {
    url: String,
    subdomain: String,
    word_count: usize,
    tokens: Vec<String>,
}

impl TokenRecord {
    /// Creates a record; the word count is the number of tokens
    pub fn new(url: impl Into<String>, subdomain: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            url: url.into(),
            subdomain: subdomain.into(),
            word_count: tokens.len(),
            tokens,
        }
    }

    /// Canonical URL of the page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lowercased host of the page
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// Number of tokens, duplicates included
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Tokens in order of appearance
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Token record as read back from storage, before the word count is checked
#[derive(Deserialize)]
struct StoredTokenRecord {
    url: String,
    subdomain: String,
    word_count: usize,
    tokens: Vec<String>,
}

impl TryFrom<StoredTokenRecord> for TokenRecord {
    type Error = String;

    fn try_from(stored: StoredTokenRecord) -> Result<Self, Self::Error> {
        if stored.word_count != stored.tokens.len() {
            return Err(format!(
                "word_count {} does not match {} tokens for {}",
                stored.word_count,
                stored.tokens.len(),
                stored.url
            ));
        }
        Ok(Self::new(stored.url, stored.subdomain, stored.tokens))
    }
}

/// Append-only sink for token records
///
/// Implementations must be safe to share between worker threads; each append
/// is atomic with respect to other appends.
pub trait RecordSink: Send + Sync {
    /// Appends one record
    fn append(&self, record: &TokenRecord) -> OutputResult<()>;
}

/// Append-only sink for diagnostic lines
///
/// Implementations must be safe to share between worker threads; each line is
/// written whole.
pub trait DiagnosticSink: Send + Sync {
    /// Appends one line (without trailing newline)
    fn append_line(&self, line: &str) -> OutputResult<()>;
}
