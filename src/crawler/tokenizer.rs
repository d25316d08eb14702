/// Words dropped from every token stream
pub const STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "for", "is", "on", "that", "with", "as", "by", "at", "an",
    "be", "from", "this", "or", "it", "are", "was",
];

/// Splits text into lowercase alphanumeric tokens, without stopwords
///
/// The text is lower-cased, tokens are the maximal runs of `[a-z0-9]`, and
/// stopwords are removed. Order and duplicates are kept, so the token count of
/// a page is the length of the result.
///
/// # Example
///
/// ```
/// use page_scraper::crawler::tokenize;
///
/// assert_eq!(tokenize("The Quick fox2 runs!"), vec!["quick", "fox2", "runs"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Returns true if the token is in the stopword set
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}
