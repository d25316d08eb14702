//! Page processor
//!
//! Turns one fetch result into the set of crawlable outbound links and, when
//! text analysis is enabled, a token record for the page itself.

use crate::config::{PolicyConfig, ScraperConfig};
use crate::crawler::fetcher::FetchResult;
use crate::crawler::parser::{extract_hrefs, extract_text};
use crate::crawler::tokenizer::tokenize;
use crate::output::{DiagnosticSink, RecordSink, TokenRecord};
use crate::url::{canonicalize, extract_subdomain, strip_fragment, ScopeFilter};
use crate::Result;
use std::borrow::Cow;
use std::collections::HashSet;
use url::Url;

/// Canonical URLs with duplicates collapsed, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link; returns false if it was already present
    pub fn insert(&mut self, link: String) -> bool {
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

/// Processes fetched pages according to a crawl policy
///
/// The processor holds no mutable state, so one instance can serve any number
/// of worker threads. Sinks are passed per call.
#[derive(Debug, Clone)]
pub struct PageProcessor {
    scope: ScopeFilter,
    accept_redirects: bool,
    analyze_text: bool,
}

impl PageProcessor {
    /// Builds a processor from the full configuration
    pub fn new(config: &ScraperConfig) -> Self {
        Self::with_scope(ScopeFilter::new(&config.scope), &config.policy)
    }

    /// Builds a processor from an explicit scope filter and policy
    pub fn with_scope(scope: ScopeFilter, policy: &PolicyConfig) -> Self {
        Self {
            scope,
            accept_redirects: policy.accept_redirects,
            analyze_text: policy.analyze_text,
        }
    }

    /// The scope filter applied to extracted links
    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    /// Returns true if a response with this status is processed as a page
    ///
    /// The range is [200, 400) when redirects are accepted, [200, 300) otherwise.
    pub fn accepts_status(&self, status_code: u16) -> bool {
        let upper = if self.accept_redirects { 400 } else { 300 };
        (200..upper).contains(&status_code)
    }

    /// Processes one page: logs the visit, emits its token record, returns in-scope links
    ///
    /// # Flow
    ///
    /// 1. Append `[SCRAPER] got: <url>` to the diagnostic sink
    /// 2. Skip pages that are absent, unsuccessful, bodiless or declared non-HTML
    /// 3. Extract and canonicalize links against the page's final URL
    /// 4. If text analysis is enabled, append a token record to the record sink
    /// 5. Keep links accepted by the scope filter, without duplicates
    ///
    /// Sink failures are logged and do not affect the returned links.
    ///
    /// # Errors
    ///
    /// Returns `ScraperError::Url` only if the scope filter is handed a string
    /// it cannot parse, which canonical links never are.
    pub fn scrape(
        &self,
        url: &str,
        resp: Option<&FetchResult>,
        records: &dyn RecordSink,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<LinkSet> {
        if let Err(e) = diagnostics.append_line(&format!("[SCRAPER] got: {}", url)) {
            tracing::warn!("Failed to write diagnostic line for {}: {}", url, e);
        }

        let (resp, html) = match self.page_html(resp) {
            Some(page) => page,
            None => return Ok(LinkSet::new()),
        };

        let links = self.canonical_links(url, resp, &html);

        if self.analyze_text {
            if let Some(record) = self.build_record(url, resp, &html) {
                if let Err(e) = records.append(&record) {
                    tracing::warn!("Failed to write token record for {}: {}", record.url(), e);
                }
            }
        }

        let mut accepted = LinkSet::new();
        for link in links {
            if self.scope.is_valid(&link)? {
                accepted.insert(link);
            }
        }

        tracing::debug!("{}: {} in-scope links", url, accepted.len());
        Ok(accepted)
    }

    /// Extracts canonical outbound links without applying the scope filter
    ///
    /// Links keep document order and duplicates. Returns an empty list for
    /// pages that are not processed (see [`PageProcessor::scrape`]).
    pub fn extract_next_links(&self, url: &str, resp: Option<&FetchResult>) -> Vec<String> {
        match self.page_html(resp) {
            Some((resp, html)) => self.canonical_links(url, resp, &html),
            None => Vec::new(),
        }
    }

    /// Builds the token record for a page without writing it anywhere
    ///
    /// Returns None for pages that are not processed or whose URL is unusable.
    pub fn analyze(&self, url: &str, resp: Option<&FetchResult>) -> Option<TokenRecord> {
        let (resp, html) = self.page_html(resp)?;
        self.build_record(url, resp, &html)
    }

    /// Applies the status, body and content-type gates and decodes the body
    fn page_html<'a>(&self, resp: Option<&'a FetchResult>) -> Option<(&'a FetchResult, Cow<'a, str>)> {
        let resp = resp?;

        if !self.accepts_status(resp.status_code) {
            tracing::debug!(
                "Skipping {}: status {}",
                resp.requested_url,
                resp.status_code
            );
            return None;
        }

        if resp.is_declared_non_html() {
            tracing::debug!(
                "Skipping {}: content type {:?}",
                resp.requested_url,
                resp.content_type
            );
            return None;
        }

        let body = resp.body.as_ref()?;
        Some((resp, body.decode()))
    }

    /// The URL relative links resolve against: final URL, else the requested one
    fn base_url<'a>(url: &'a str, resp: &'a FetchResult) -> &'a str {
        match resp.final_url() {
            Some(final_url) => final_url,
            None if !url.is_empty() => url,
            None => &resp.requested_url,
        }
    }

    fn canonical_links(&self, url: &str, resp: &FetchResult, html: &str) -> Vec<String> {
        let base = Self::base_url(url, resp);
        let base = match Url::parse(base) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Cannot resolve links against {:?}: {}", base, e);
                return Vec::new();
            }
        };

        extract_hrefs(html)
            .into_iter()
            .filter_map(|href| match canonicalize(&base, &href) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::trace!("Dropping href {:?} on {}: {}", href, base, e);
                    None
                }
            })
            .collect()
    }

    fn build_record(&self, url: &str, resp: &FetchResult, html: &str) -> Option<TokenRecord> {
        let page_url = match strip_fragment(Self::base_url(url, resp)) {
            Ok(page_url) => page_url,
            Err(e) => {
                tracing::warn!("Not recording tokens for {}: {}", url, e);
                return None;
            }
        };

        let subdomain = extract_subdomain(&page_url).unwrap_or_default();
        let tokens = tokenize(&extract_text(html));
        Some(TokenRecord::new(page_url.as_str(), subdomain, tokens))
    }
}

impl Default for PageProcessor {
    fn default() -> Self {
        Self::new(&ScraperConfig::default())
    }
}
