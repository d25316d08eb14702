//! Statistics over collected token records
//!
//! This module summarizes a record file after (or during) a crawl: how many
//! pages were analyzed, which page was longest, and how pages spread across
//! subdomains.

use crate::output::traits::{OutputResult, TokenRecord};
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Token record statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStatistics {
    /// Number of records read
    pub total_records: u64,

    /// Number of distinct page URLs
    pub unique_pages: u64,

    /// URL and word count of the longest page
    pub longest_page: Option<(String, usize)>,

    /// Distinct pages per subdomain
    pub pages_by_subdomain: BTreeMap<String, u64>,

    /// Lines that could not be parsed as records
    pub skipped_lines: u64,
}

impl RecordStatistics {
    /// Builds statistics from records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TokenRecord>) -> Self {
        let mut stats = Self::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for record in records {
            stats.total_records += 1;

            if seen.insert(record.url()) {
                stats.unique_pages += 1;
                *stats
                    .pages_by_subdomain
                    .entry(record.subdomain().to_string())
                    .or_insert(0) += 1;
            }

            let longer = stats
                .longest_page
                .as_ref()
                .map_or(true, |(_, count)| record.word_count() > *count);
            if longer {
                stats.longest_page = Some((record.url().to_string(), record.word_count()));
            }
        }

        stats
    }
}

/// Loads statistics from a JSON-lines record file
///
/// Blank lines are ignored; lines that are not valid records are counted in
/// `skipped_lines` and otherwise ignored.
pub fn load_statistics(path: &Path) -> OutputResult<RecordStatistics> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut skipped_lines = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<TokenRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping line {} of {}: {}", index + 1, path.display(), e);
                skipped_lines += 1;
            }
        }
    }

    let mut stats = RecordStatistics::from_records(&records);
    stats.skipped_lines = skipped_lines;
    Ok(stats)
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RecordStatistics) {
    println!("=== Token Record Statistics ===\n");

    println!("Overview:");
    println!("  Records: {}", stats.total_records);
    println!("  Unique pages: {}", stats.unique_pages);
    if stats.skipped_lines > 0 {
        println!("  Skipped lines: {}", stats.skipped_lines);
    }
    println!();

    if let Some((url, count)) = &stats.longest_page {
        println!("Longest page: {} ({} words)", url, count);
        println!();
    }

    println!("Pages by Subdomain ({}):", stats.pages_by_subdomain.len());
    for (subdomain, count) in &stats.pages_by_subdomain {
        println!("  {}, {}", subdomain, count);
    }
}
