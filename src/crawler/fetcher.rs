//! Fetch results handed to the page processor
//!
//! The crawler's fetcher owns the network; this module only describes what it
//! hands over, plus an adapter that turns a `reqwest` response into that shape.

use reqwest::header::CONTENT_TYPE;
use std::borrow::Cow;

/// Page body as delivered by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// Already decoded text
    Text(String),
    /// Raw bytes, decoded as UTF-8 on demand
    Bytes(Vec<u8>),
}

impl PageBody {
    /// Returns the body as text, replacing undecodable byte sequences
    pub fn decode(&self) -> Cow<'_, str> {
        match self {
            PageBody::Text(text) => Cow::Borrowed(text),
            PageBody::Bytes(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

/// Result of fetching one page
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL the crawler asked for
    pub requested_url: String,

    /// Final URL after redirects (None when the fetcher did not record one)
    pub final_url: Option<String>,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Page body (None when no response body was received)
    pub body: Option<PageBody>,

    /// Transport error description, if any
    pub error: Option<String>,
}

impl FetchResult {
    /// Creates a result with a status code and nothing else
    pub fn new(requested_url: impl Into<String>, status_code: u16) -> Self {
        Self {
            requested_url: requested_url.into(),
            final_url: None,
            status_code,
            content_type: None,
            body: None,
            error: None,
        }
    }

    /// Creates a result for a request that failed before a response arrived
    ///
    /// The status code is 0, which no processing policy accepts.
    pub fn from_error(requested_url: impl Into<String>, error: impl std::fmt::Display) -> Self {
        let mut result = Self::new(requested_url, 0);
        result.error = Some(error.to_string());
        result
    }

    /// Converts a `reqwest` response, reading its body to completion
    ///
    /// A body read failure is recorded in `error` and leaves `body` empty.
    pub async fn from_response(requested_url: impl Into<String>, response: reqwest::Response) -> Self {
        let mut result = Self::new(requested_url, response.status().as_u16());
        result.final_url = Some(response.url().to_string());
        result.content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match response.bytes().await {
            Ok(bytes) => result.body = Some(PageBody::Bytes(bytes.to_vec())),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", result.requested_url, e);
                result.error = Some(e.to_string());
            }
        }

        result
    }

    /// Sets the final URL after redirects
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = Some(final_url.into());
        self
    }

    /// Sets the declared Content-Type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets a decoded text body
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body = Some(PageBody::Text(text.into()));
        self
    }

    /// Sets a raw byte body
    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(PageBody::Bytes(bytes.into()));
        self
    }

    /// Returns the final URL, treating an empty one as absent
    pub fn final_url(&self) -> Option<&str> {
        self.final_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns true if the declared content type rules out HTML
    ///
    /// A missing or empty Content-Type is treated as HTML.
    pub fn is_declared_non_html(&self) -> bool {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() => !ct.to_lowercase().contains("text/html"),
            _ => false,
        }
    }
}
