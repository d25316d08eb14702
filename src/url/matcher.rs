/// Checks if a host falls under an allow-listed domain
///
/// A host matches when it is the domain itself or any subdomain of it:
/// - "ics.uci.edu" matches "ics.uci.edu"
/// - "ics.uci.edu" matches "vision.ics.uci.edu"
/// - "ics.uci.edu" does not match "physics.uci.edu"
///
/// # Arguments
///
/// * `domain` - The allow-listed domain (lowercase)
/// * `host` - The host to check (lowercase)
///
/// # Examples
///
/// ```
/// use page_scraper::url::matches_domain;
///
/// assert!(matches_domain("ics.uci.edu", "ics.uci.edu"));
/// assert!(matches_domain("ics.uci.edu", "www.ics.uci.edu"));
/// assert!(!matches_domain("ics.uci.edu", "physics.uci.edu"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}
