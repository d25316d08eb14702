use serde::Deserialize;

/// Domains crawled by the default scope policy
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "ics.uci.edu",
    "cs.uci.edu",
    "informatics.uci.edu",
    "stat.uci.edu",
    "today.uci.edu",
];

/// Main configuration structure for Page-Scraper
///
/// Every section is optional; an empty file yields the default policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScraperConfig {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Page processing behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Process 3xx responses as pages (status range [200, 400) instead of [200, 300))
    #[serde(rename = "accept-redirects", default = "default_true")]
    pub accept_redirects: bool,

    /// Tokenize page text and emit a token record per page
    #[serde(rename = "analyze-text", default = "default_true")]
    pub analyze_text: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            accept_redirects: true,
            analyze_text: true,
        }
    }
}

/// Crawl scope restrictions
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeConfig {
    /// Allowed domains (subdomains included); absent means unrestricted
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Option<Vec<String>>,

    /// Hosts that are only crawled below a path prefix
    #[serde(rename = "path-restrictions", default)]
    pub path_restrictions: Vec<PathRestriction>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Some(
                DEFAULT_ALLOWED_DOMAINS
                    .iter()
                    .map(|d| d.to_string())
                    .collect(),
            ),
            path_restrictions: vec![PathRestriction {
                host: "today.uci.edu".to_string(),
                prefix: "/department/information_computer_sciences".to_string(),
            }],
        }
    }
}

/// A host that is only in scope under a path prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathRestriction {
    /// Exact host (e.g., "today.uci.edu")
    pub host: String,

    /// Required path prefix (e.g., "/department/information_computer_sciences")
    pub prefix: String,
}

/// Where token records and diagnostic lines are written
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path to the token record file
    #[serde(rename = "records-path", default = "default_records_path")]
    pub records_path: String,

    /// Storage format of the token record file
    #[serde(rename = "records-format", default)]
    pub records_format: RecordsFormat,

    /// Path to the diagnostic log file
    #[serde(rename = "log-path", default = "default_log_path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
            records_format: RecordsFormat::default(),
            log_path: default_log_path(),
        }
    }
}

/// Token record storage format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordsFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// SQLite database
    Sqlite,
}

fn default_true() -> bool {
    true
}

fn default_records_path() -> String {
    "data.txt".to_string()
}

fn default_log_path() -> String {
    "scraper.log".to_string()
}
