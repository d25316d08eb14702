use url::Url;

/// Extracts the subdomain (lowercased host) from a URL
///
/// The port is not part of the result. Returns None for URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_scraper::url::extract_subdomain;
///
/// let url = Url::parse("https://Vision.ICS.uci.edu/path").unwrap();
/// assert_eq!(extract_subdomain(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_subdomain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
