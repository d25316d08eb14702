//! Crawler module for page processing
//!
//! This module contains the per-page logic of the crawler:
//! - Fetch results as handed over by the fetcher
//! - HTML link and text extraction
//! - Tokenization of page text
//! - The page processor tying them to the URL scope policy

mod fetcher;
mod parser;
mod processor;
mod tokenizer;

pub use fetcher::{FetchResult, PageBody};
pub use parser::{extract_hrefs, extract_text};
pub use processor::{LinkSet, PageProcessor};
pub use tokenizer::{is_stopword, tokenize, STOPWORDS};

use crate::config::ScraperConfig;
use crate::output::{DiagnosticSink, RecordSink};
use crate::Result;

/// Processes one fetched page with a freshly built processor
///
/// Convenience entry point for callers that handle a single page. Crawlers
/// processing many pages should build one [`PageProcessor`] and share it.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `url` - The URL the crawler requested
/// * `resp` - The fetch result, if any
/// * `records` - Sink for the page's token record
/// * `diagnostics` - Sink for the visit log line
///
/// # Returns
///
/// * `Ok(LinkSet)` - In-scope canonical links found on the page
/// * `Err(ScraperError)` - The scope filter received an unparsable URL
pub fn scrape_page(
    config: &ScraperConfig,
    url: &str,
    resp: Option<&FetchResult>,
    records: &dyn RecordSink,
    diagnostics: &dyn DiagnosticSink,
) -> Result<LinkSet> {
    PageProcessor::new(config).scrape(url, resp, records, diagnostics)
}
