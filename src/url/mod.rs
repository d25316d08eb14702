//! URL handling module for Page-Scraper
//!
//! This module provides link canonicalization, subdomain extraction, domain
//! suffix matching, and the scope filter that decides which URLs are crawlable.

mod canonical;
mod domain;
mod matcher;

use crate::config::{PathRestriction, ScopeConfig};
use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use canonical::{canonicalize, canonicalize_str, strip_fragment};
pub use domain::extract_subdomain;
pub use matcher::matches_domain;

/// File extensions that are never crawled (media, archives, documents, executables)
pub const FORBIDDEN_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2", "mp3",
    "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps", "eps",
    "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe", "bz2",
    "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx",
    "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
];

/// Decides whether a canonical URL is eligible for crawling
///
/// The filter is a pure decision function built once from configuration and
/// shared freely between workers.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    /// Allowed domains; None means any host is in scope
    allowed_domains: Option<Vec<String>>,

    /// Hosts that are only in scope under a path prefix
    path_restrictions: Vec<PathRestriction>,
}

impl ScopeFilter {
    /// Builds a scope filter from the scope configuration
    pub fn new(config: &ScopeConfig) -> Self {
        Self {
            allowed_domains: config
                .allowed_domains
                .as_ref()
                .map(|domains| domains.iter().map(|d| d.to_lowercase()).collect()),
            path_restrictions: config
                .path_restrictions
                .iter()
                .map(|r| PathRestriction {
                    host: r.host.to_lowercase(),
                    prefix: r.prefix.clone(),
                })
                .collect(),
        }
    }

    /// A filter that accepts any http(s) host; only extensions are checked
    pub fn unrestricted() -> Self {
        Self {
            allowed_domains: None,
            path_restrictions: Vec::new(),
        }
    }

    /// Decides whether to crawl a URL
    ///
    /// # Decision Sequence
    ///
    /// 1. Parse the URL; input that is not an absolute URL is a caller bug and
    ///    is logged then returned as an error
    /// 2. Reject unless the scheme is `http` or `https`
    /// 3. Reject hosts outside the allow-list (when one is configured)
    /// 4. Reject restricted hosts whose path lacks the required prefix
    /// 5. Reject paths ending in a forbidden file extension
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The URL is in scope
    /// * `Ok(false)` - The URL was filtered out (a normal outcome)
    /// * `Err(UrlError::Parse)` - The input could not be parsed at all
    ///
    /// # Examples
    ///
    /// ```
    /// use page_scraper::url::ScopeFilter;
    ///
    /// let filter = ScopeFilter::default();
    /// assert!(filter.is_valid("http://ics.uci.edu/page").unwrap());
    /// assert!(!filter.is_valid("http://evil.com/page").unwrap());
    /// assert!(filter.is_valid("not a url").is_err());
    /// ```
    pub fn is_valid(&self, url: &str) -> UrlResult<bool> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Unparsable URL passed to scope filter: {:?} ({})", url, e);
                return Err(UrlError::Parse {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Ok(false);
        }

        let host = extract_subdomain(&parsed).unwrap_or_default();
        if !self.host_allowed(&host) {
            return Ok(false);
        }

        if !self.path_allowed(&host, parsed.path()) {
            return Ok(false);
        }

        Ok(!has_forbidden_extension(parsed.path()))
    }

    /// Checks the host against the allow-list
    fn host_allowed(&self, host: &str) -> bool {
        match &self.allowed_domains {
            Some(domains) => domains.iter().any(|d| matches_domain(d, host)),
            None => true,
        }
    }

    /// Checks the per-host path prefix restrictions
    fn path_allowed(&self, host: &str, path: &str) -> bool {
        self.path_restrictions
            .iter()
            .filter(|r| r.host == host)
            .all(|r| path.starts_with(&r.prefix))
    }
}

impl Default for ScopeFilter {
    fn default() -> Self {
        Self::new(&ScopeConfig::default())
    }
}

/// Checks whether a URL path ends in a forbidden file extension (case-insensitive)
///
/// # Examples
///
/// ```
/// use page_scraper::url::has_forbidden_extension;
///
/// assert!(has_forbidden_extension("/papers/file.PDF"));
/// assert!(!has_forbidden_extension("/papers/file.html"));
/// ```
pub fn has_forbidden_extension(path: &str) -> bool {
    let path = path.to_lowercase();
    match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => FORBIDDEN_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uci() -> ScopeFilter {
        ScopeFilter::default()
    }

    #[test]
    fn test_accept_allowed_domain() {
        assert!(uci().is_valid("http://ics.uci.edu/page").unwrap());
        assert!(uci().is_valid("https://www.informatics.uci.edu/").unwrap());
        assert!(uci().is_valid("https://stat.uci.edu/faculty").unwrap());
    }

    #[test]
    fn test_reject_foreign_domain() {
        assert!(!uci().is_valid("http://evil.com/page").unwrap());
        assert!(!uci().is_valid("http://physics.uci.edu/").unwrap());
        assert!(!uci().is_valid("http://uci.edu/").unwrap());
    }

    #[test]
    fn test_reject_non_http_scheme() {
        assert!(!uci().is_valid("ftp://ics.uci.edu/pub").unwrap());
        assert!(!uci().is_valid("mailto:someone@ics.uci.edu").unwrap());
        assert!(!uci().is_valid("file:///etc/passwd").unwrap());
    }

    #[test]
    fn test_today_path_restriction() {
        assert!(!uci().is_valid("http://today.uci.edu/other/path").unwrap());
        assert!(uci()
            .is_valid("http://today.uci.edu/department/information_computer_sciences/news")
            .unwrap());
    }

    #[test]
    fn test_path_restriction_is_exact_host_only() {
        // Subdomains of today.uci.edu pass the allow-list without the prefix rule
        assert!(uci().is_valid("http://www.today.uci.edu/other/path").unwrap());
    }

    #[test]
    fn test_reject_forbidden_extension_case_insensitive() {
        assert!(!uci().is_valid("http://ics.uci.edu/file.PDF").unwrap());
        assert!(!uci().is_valid("http://ics.uci.edu/archive.tar.gz").unwrap());
        assert!(!uci().is_valid("http://ics.uci.edu/photo.JpEg").unwrap());
        assert!(uci().is_valid("http://ics.uci.edu/file.html").unwrap());
    }

    #[test]
    fn test_extension_only_checks_path() {
        assert!(uci().is_valid("http://ics.uci.edu/download?file=a.pdf").unwrap());
        assert!(uci().is_valid("http://ics.uci.edu/papers.pdf/").unwrap());
    }

    #[test]
    fn test_host_with_port() {
        assert!(uci().is_valid("http://ics.uci.edu:8080/page").unwrap());
    }

    #[test]
    fn test_unparsable_input_is_error() {
        let result = uci().is_valid("not a url");
        assert!(matches!(result, Err(UrlError::Parse { .. })));

        let result = ScopeFilter::unrestricted().is_valid("");
        assert!(result.is_err());
    }

    #[test]
    fn test_unrestricted_filter() {
        let filter = ScopeFilter::unrestricted();
        assert!(filter.is_valid("https://evil.com/page").unwrap());
        assert!(filter.is_valid("http://today.uci.edu/other/path").unwrap());
        assert!(!filter.is_valid("https://evil.com/movie.mkv").unwrap());
        assert!(!filter.is_valid("ftp://evil.com/").unwrap());
    }

    #[test]
    fn test_custom_scope_config() {
        let config = ScopeConfig {
            allowed_domains: Some(vec!["Example.COM".to_string()]),
            path_restrictions: vec![PathRestriction {
                host: "news.example.com".to_string(),
                prefix: "/tech".to_string(),
            }],
        };
        let filter = ScopeFilter::new(&config);

        assert!(filter.is_valid("https://blog.example.com/").unwrap());
        assert!(filter.is_valid("https://news.example.com/tech/ai").unwrap());
        assert!(!filter.is_valid("https://news.example.com/sports").unwrap());
        assert!(!filter.is_valid("https://example.org/").unwrap());
    }

    #[test]
    fn test_has_forbidden_extension() {
        assert!(has_forbidden_extension("/a/b.css"));
        assert!(has_forbidden_extension("/setup.EXE"));
        assert!(has_forbidden_extension("/.zip"));
        assert!(!has_forbidden_extension("/"));
        assert!(!has_forbidden_extension("/index.php"));
        assert!(!has_forbidden_extension("/v1.2/docs"));
        assert!(!has_forbidden_extension("/pdf"));
    }

    #[test]
    fn test_every_listed_extension_rejected() {
        for ext in FORBIDDEN_EXTENSIONS {
            let url = format!("http://ics.uci.edu/file.{}", ext.to_uppercase());
            assert!(!uci().is_valid(&url).unwrap(), "accepted {}", url);
        }
    }
}
