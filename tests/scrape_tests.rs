//! Integration tests for page processing
//!
//! These tests drive the public API end-to-end: fetch result in, links and
//! records out, with file-backed sinks shared across worker threads.

use page_scraper::config::{parse_config, PolicyConfig, ScraperConfig};
use page_scraper::crawler::{extract_hrefs, scrape_page, tokenize, FetchResult, PageProcessor};
use page_scraper::output::{load_statistics, FileLineSink, JsonLinesSink, MemorySink, NullSink};
use page_scraper::url::{canonicalize, ScopeFilter};
use page_scraper::{ScraperError, TokenRecord, UrlError};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use url::Url;

fn page(url: &str, status: u16, html: &str) -> FetchResult {
    FetchResult::new(url, status)
        .with_final_url(url)
        .with_content_type("text/html")
        .with_text(html)
}

#[test]
fn test_canonicalization_properties() {
    let base = Url::parse("http://cs.uci.edu/dir/page.html").unwrap();
    assert_eq!(
        canonicalize(&base, "sub/p.html").unwrap(),
        "http://cs.uci.edu/dir/sub/p.html"
    );

    let base = Url::parse("http://a.edu/x#frag").unwrap();
    assert_eq!(canonicalize(&base, "http://a.edu/x#frag").unwrap(), "http://a.edu/x");

    let canonical = "http://a.edu/x";
    let base = Url::parse(canonical).unwrap();
    assert_eq!(canonicalize(&base, canonical).unwrap(), canonical);
}

#[test]
fn test_scope_properties() {
    let filter = ScopeFilter::default();
    assert!(filter.is_valid("http://ics.uci.edu/page").unwrap());
    assert!(!filter.is_valid("http://evil.com/page").unwrap());
    assert!(!filter.is_valid("http://today.uci.edu/other/path").unwrap());
    assert!(filter
        .is_valid("http://today.uci.edu/department/information_computer_sciences/news")
        .unwrap());
    assert!(!filter.is_valid("http://ics.uci.edu/file.PDF").unwrap());
    assert!(filter.is_valid("http://ics.uci.edu/file.html").unwrap());
}

#[test]
fn test_scope_filter_error_propagates() {
    let result = ScopeFilter::default().is_valid("::not-a-url::");
    assert!(matches!(result, Err(UrlError::Parse { .. })));

    let err: ScraperError = result.unwrap_err().into();
    assert!(matches!(err, ScraperError::Url(_)));
}

#[test]
fn test_tokenizer_property() {
    assert_eq!(tokenize("The Quick fox2 runs!"), vec!["quick", "fox2", "runs"]);
}

#[test]
fn test_link_extractor_property() {
    let html = r#"<p>no link</p><a name="x">anchor</a><img href="/img"><a href="/real">r</a><a href=unterminated"#;
    assert_eq!(extract_hrefs(html), vec!["/real"]);
}

#[test]
fn test_not_found_returns_no_links() {
    let html = r#"<a href="http://ics.uci.edu/a">a</a><a href="http://ics.uci.edu/b">b</a>"#;
    let resp = page("http://ics.uci.edu/", 404, html);

    let links = scrape_page(
        &ScraperConfig::default(),
        "http://ics.uci.edu/",
        Some(&resp),
        &NullSink,
        &NullSink,
    )
    .unwrap();

    assert!(links.is_empty());
}

#[test]
fn test_configured_policy_end_to_end() {
    let config = parse_config(
        r#"
[policy]
accept-redirects = false

[scope]
allowed-domains = ["example.com"]

[[scope.path-restrictions]]
host = "news.example.com"
prefix = "/tech"
"#,
    )
    .unwrap();
    let processor = PageProcessor::new(&config);
    let html = r#"
        <a href="https://news.example.com/tech/rust">in</a>
        <a href="https://news.example.com/sports/">out</a>
        <a href="https://blog.example.com/post?id=1">in</a>
        <a href="https://blog.example.com/post?id=2">in</a>
        <a href="https://example.org/">out</a>
    "#;

    let links = processor
        .scrape(
            "https://example.com/",
            Some(&page("https://example.com/", 200, html)),
            &NullSink,
            &NullSink,
        )
        .unwrap();
    assert_eq!(
        links.into_vec(),
        vec![
            "https://news.example.com/tech/rust",
            "https://blog.example.com/post?id=1",
            "https://blog.example.com/post?id=2",
        ]
    );

    let redirect = page("https://example.com/", 301, html);
    let links = processor
        .scrape("https://example.com/", Some(&redirect), &NullSink, &NullSink)
        .unwrap();
    assert!(links.is_empty());
}

#[test]
fn test_concurrent_workers_share_sinks() {
    let dir = TempDir::new().unwrap();
    let records_path = dir.path().join("data.txt");
    let log_path = dir.path().join("scraper.log");

    let processor = Arc::new(PageProcessor::default());
    let records = Arc::new(JsonLinesSink::open(&records_path).unwrap());
    let diagnostics = Arc::new(FileLineSink::open(&log_path).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let processor = Arc::clone(&processor);
            let records = Arc::clone(&records);
            let diagnostics = Arc::clone(&diagnostics);
            thread::spawn(move || {
                for n in 0..25 {
                    let url = format!("http://ics.uci.edu/w{}/p{}", worker, n);
                    let html = format!(
                        "<p>worker {} page {} research news</p> <a href=\"next\">next</a>",
                        worker, n
                    );
                    let links = processor
                        .scrape(&url, Some(&page(&url, 200, &html)), &*records, &*diagnostics)
                        .unwrap();
                    assert_eq!(links.len(), 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 200);
    assert!(log.lines().all(|l| l.starts_with("[SCRAPER] got: http://ics.uci.edu/w")));

    let content = std::fs::read_to_string(&records_path).unwrap();
    for line in content.lines() {
        let record: TokenRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.word_count(), 7);
    }

    let stats = load_statistics(&records_path).unwrap();
    assert_eq!(stats.total_records, 200);
    assert_eq!(stats.unique_pages, 200);
    assert_eq!(stats.pages_by_subdomain["ics.uci.edu"], 200);
    assert_eq!(stats.skipped_lines, 0);
}

#[test]
fn test_library_caller_collects_records_in_memory() {
    let processor = PageProcessor::with_scope(ScopeFilter::unrestricted(), &PolicyConfig::default());
    let sink = MemorySink::new();

    for (url, text) in [
        ("https://example.com/a", "alpha beta"),
        ("https://example.com/b#section", "gamma"),
    ] {
        let resp = FetchResult::new(url, 200).with_text(format!("<p>{}</p>", text));
        processor.scrape(url, Some(&resp), &sink, &NullSink).unwrap();
    }

    let urls: Vec<String> = sink.records().iter().map(|r| r.url().to_string()).collect();
    assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
}
