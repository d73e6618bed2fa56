use once_cell::sync::Lazy;
use regex::Regex;

/// Recognition rules tried in priority order; the first match wins.
///
/// The last rule accepts any non-empty slash-free string as a bare subreddit
/// name, so extraction only fails on input no rule can capture. No existence
/// check is made against Reddit; a downstream fetch is the only validation.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)reddit\.com/r/([^/]+)").unwrap(),
        Regex::new(r"(?i)old\.reddit\.com/r/([^/]+)").unwrap(),
        Regex::new(r"(?i)www\.reddit\.com/r/([^/]+)").unwrap(),
        Regex::new(r"(?i)^r/([^/]+)").unwrap(),
        Regex::new(r"(?i)^([^/]+)$").unwrap(),
    ]
});

/// Extract a subreddit name from a full URL, a partial path, or a bare name.
#[must_use]
pub fn extract_subreddit(input: &str) -> Option<String> {
    for pattern in PATTERNS.iter() {
        if let Some(captures) = pattern.captures(input) {
            if let Some(name) = captures.get(1) {
                return Some(name.as_str().to_string());
            }
        }
    }
    None
}
