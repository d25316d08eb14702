//! HTML parser for extracting links and text
//!
//! Both extractors build a fresh document per call with the html5ever tree
//! builder behind `scraper`, which recovers from malformed markup instead of
//! failing. Ill-formed constructs (unclosed tags, stray `<`, broken attributes)
//! are skipped or repaired the way a browser would.
//!
//! Documents are parsed with scripting disabled, so `<noscript>` content is
//! markup rather than raw text. `<title>` and `<textarea>` stay raw text as in
//! any HTML5 parser.

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{Html, Selector};

/// Builds a document the way a browser without JavaScript would
fn parse_html(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(Html::new_document(), opts).one(html)
}

/// Extracts raw `href` values from anchor tags
///
/// # Extraction Rules
///
/// - Only `<a>` tags are considered (tag and attribute names match
///   case-insensitively)
/// - Values are trimmed; empty or whitespace-only values are dropped
/// - Document order is kept and duplicates are preserved
///
/// # Example
///
/// ```
/// use page_scraper::crawler::extract_hrefs;
///
/// let html = r#"<A HREF=" /a ">A</A><link href="/style.css"><a name="x">no href</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["/a".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = parse_html(html);
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() {
                    hrefs.push(href.to_string());
                }
            }
        }
    }

    hrefs
}

/// Extracts the concatenation of every text node in document order
///
/// Script and style content is included; no separator is inserted between
/// adjacent text nodes.
///
/// # Example
///
/// ```
/// use page_scraper::crawler::extract_text;
///
/// let html = "<html><body><p>Hello</p><p>world</p></body></html>";
/// assert_eq!(extract_text(html), "Helloworld");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = parse_html(html);
    document.root_element().text().collect()
}
