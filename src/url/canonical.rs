use crate::{UrlError, UrlResult};
use url::Url;

/// Link prefixes that never lead to a crawlable page
const EXCLUDED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Canonicalizes a link found on a page
///
/// # Canonicalization Steps
///
/// 1. Reject empty hrefs and `javascript:`, `mailto:`, `tel:` links
///    (case-sensitive prefix match)
/// 2. Resolve the href against the base URL (relative paths, `//host/...`,
///    query-only and fragment-only forms)
/// 3. Remove the fragment (everything after #)
/// 4. Reject the result if it has no host
///
/// Canonicalization is shallow on purpose: no percent-decoding, no trailing
/// slash rewriting and no query reordering, so two URLs that differ only by
/// query stay distinct. Canonicalizing a canonical URL against itself returns
/// the same string.
///
/// # Arguments
///
/// * `base` - The absolute URL of the page the link was found on
/// * `href` - The raw href value (absolute or relative)
///
/// # Returns
///
/// * `Ok(String)` - The canonical absolute URL
/// * `Err(UrlError)` - The link was rejected
///
/// # Examples
///
/// ```
/// use page_scraper::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("http://cs.uci.edu/dir/page.html").unwrap();
/// assert_eq!(
///     canonicalize(&base, "sub/p.html#top").unwrap(),
///     "http://cs.uci.edu/dir/sub/p.html"
/// );
/// ```
pub fn canonicalize(base: &Url, href: &str) -> UrlResult<String> {
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    if let Some(prefix) = EXCLUDED_PREFIXES.iter().find(|p| href.starts_with(*p)) {
        return Err(UrlError::ExcludedScheme(prefix.trim_end_matches(':').to_string()));
    }

    let mut resolved = base.join(href).map_err(|e| UrlError::Parse {
        url: href.to_string(),
        message: e.to_string(),
    })?;
    resolved.set_fragment(None);

    // A parsed Url always has a scheme, only the host can be missing
    if resolved.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(resolved.to_string()));
    }

    Ok(resolved.to_string())
}

/// Canonicalizes a link against a base given as a string
///
/// Fails with `UrlError::Parse` when the base itself is not an absolute URL.
pub fn canonicalize_str(base: &str, href: &str) -> UrlResult<String> {
    let base = Url::parse(base).map_err(|e| UrlError::Parse {
        url: base.to_string(),
        message: e.to_string(),
    })?;
    canonicalize(&base, href)
}

/// Removes the fragment from an absolute URL, the form used for a page's own address
pub fn strip_fragment(url: &str) -> UrlResult<Url> {
    let mut parsed = Url::parse(url).map_err(|e| UrlError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    parsed.set_fragment(None);
    Ok(parsed)
}
