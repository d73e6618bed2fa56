use std::time::Duration;

use chrono::DateTime;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::{MAX_LIMIT, PERMALINK_BASE_URL, USER_AGENTS};
use crate::reddit::proxy::resolve_proxies;
use crate::reddit::scraper::{SortMode, Timeframe};

/// A normalized Reddit post extracted from a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_utc: String,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
    #[serde(default)]
    pub selftext: String,
    pub subreddit: String,
    pub permalink: String,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub upvote_ratio: f64,
}

/// One listing page: posts in upstream order plus the opaque next-page cursor.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub posts: Vec<Post>,
    pub after: Option<String>,
}

/// Failure categories for a single listing fetch.
///
/// Each category renders with a distinct prefix so callers can tell proxy
/// misconfiguration apart from timeouts, upstream blocking, and bad payloads.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Proxy error: {0}. Please check your proxy settings.")]
    Proxy(String),
    #[error("Request timeout: {0}. Try increasing the delay or using a different proxy.")]
    Timeout(String),
    #[error("Request error: {0}. Reddit may be blocking your IP. Try using a proxy.")]
    Request(String),
    #[error("Parsing error: {0}")]
    Parsing(String),
}

/// Parameters for one listing page fetch.
#[derive(Debug, Clone)]
pub struct ListingQuery<'a> {
    pub subreddit: &'a str,
    pub sort: SortMode,
    pub timeframe: Timeframe,
    pub limit: u32,
    pub after: Option<&'a str>,
    pub proxy: Option<&'a str>,
    pub delay_secs: f64,
}

// Upstream payload shape: a `Listing` envelope with `data.children[].data`
// carrying the post fields and `data.after` carrying the cursor.

#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
    created_utc: f64,
    score: i64,
    num_comments: i64,
    url: String,
    #[serde(default)]
    selftext: String,
    subreddit: String,
    permalink: String,
    #[serde(default)]
    is_video: bool,
    #[serde(default)]
    over_18: bool,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    upvote_ratio: f64,
}

/// Fetch a single listing page for a subreddit.
///
/// Sleeps for the configured delay before issuing the request, issues one GET
/// with the configured timeout, and normalizes the payload into [`Post`]s.
///
/// # Errors
///
/// Returns a [`FetchError`] categorizing proxy, timeout, transport/HTTP, and
/// payload failures. Never panics on upstream misbehavior.
pub async fn fetch_listing_page(
    config: &Config,
    query: &ListingQuery<'_>,
) -> Result<ListingPage, FetchError> {
    let url = format!(
        "{}/r/{}/{}.json",
        config.reddit_base_url.trim_end_matches('/'),
        query.subreddit,
        query.sort.as_str()
    );

    // Rotate user agents to avoid detection
    let user_agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
    let mut proxied = false;
    if let Some((http_proxy, https_proxy)) = resolve_proxies(query.proxy) {
        builder = builder.proxy(http_proxy).proxy(https_proxy);
        proxied = true;
    }
    let client = builder
        .build()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let effective_limit = query.limit.min(MAX_LIMIT);
    let mut params: Vec<(&str, String)> = vec![
        ("limit", effective_limit.to_string()),
        ("t", query.timeframe.as_str().to_string()),
    ];
    if let Some(after) = query.after {
        params.push(("after", after.to_string()));
    }

    // Pause before the request to avoid rate limiting
    if query.delay_secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(query.delay_secs)).await;
    }

    debug!(url = %url, limit = effective_limit, after = ?query.after, "Fetching listing page");

    let response = client
        .get(&url)
        .header("User-Agent", user_agent)
        .header("Accept", "application/json, text/plain, */*")
        .header("Accept-Language", "en-US,en;q=0.9")
        .header("DNT", "1")
        .query(&params)
        .send()
        .await
        .map_err(|e| classify_transport_error(&e, proxied))?;

    let response = response
        .error_for_status()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let envelope: ListingEnvelope = response
        .json()
        .await
        .map_err(|e| FetchError::Parsing(e.to_string()))?;

    let mut posts = Vec::with_capacity(envelope.data.children.len());
    for child in envelope.data.children {
        posts.push(normalize_post(child.data)?);
    }

    Ok(ListingPage {
        posts,
        after: envelope.data.after,
    })
}

fn classify_transport_error(err: &reqwest::Error, proxied: bool) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if proxied && err.is_connect() {
        FetchError::Proxy(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

/// Normalize a raw listing entry into a [`Post`].
#[allow(clippy::cast_possible_truncation)]
fn normalize_post(raw: RawPost) -> Result<Post, FetchError> {
    let created = DateTime::from_timestamp(raw.created_utc as i64, 0).ok_or_else(|| {
        FetchError::Parsing(format!("invalid created_utc value {}", raw.created_utc))
    })?;

    Ok(Post {
        id: raw.id,
        title: raw.title,
        author: raw.author.unwrap_or_else(|| "[deleted]".to_string()),
        created_utc: created.format("%Y-%m-%dT%H:%M:%S").to_string(),
        score: raw.score,
        num_comments: raw.num_comments,
        url: raw.url,
        selftext: raw.selftext,
        subreddit: raw.subreddit,
        permalink: format!("{PERMALINK_BASE_URL}{}", raw.permalink),
        is_video: raw.is_video,
        over_18: raw.over_18,
        domain: raw.domain,
        upvote_ratio: raw.upvote_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw_post(author: Option<&str>) -> RawPost {
        RawPost {
            id: "abc123".to_string(),
            title: "Test post".to_string(),
            author: author.map(ToString::to_string),
            created_utc: 1_622_548_800.0,
            score: 42,
            num_comments: 7,
            url: "https://example.com/article".to_string(),
            selftext: String::new(),
            subreddit: "test".to_string(),
            permalink: "/r/test/comments/abc123/test_post/".to_string(),
            is_video: false,
            over_18: false,
            domain: "example.com".to_string(),
            upvote_ratio: 0.87,
        }
    }

    #[test]
    fn test_normalize_post_fields() {
        let post = normalize_post(sample_raw_post(Some("someone"))).unwrap();
        assert_eq!(post.author, "someone");
        assert_eq!(post.created_utc, "2021-06-01T12:00:00");
        assert_eq!(
            post.permalink,
            "https://reddit.com/r/test/comments/abc123/test_post/"
        );
    }

    #[test]
    fn test_missing_author_becomes_deleted() {
        let post = normalize_post(sample_raw_post(None)).unwrap();
        assert_eq!(post.author, "[deleted]");
    }

    #[test]
    fn test_listing_payload_deserializes_with_defaults() {
        let payload = serde_json::json!({
            "data": {
                "children": [
                    {"data": {
                        "id": "x1",
                        "title": "Minimal",
                        "author": null,
                        "created_utc": 1622548800.0,
                        "score": 1,
                        "num_comments": 0,
                        "url": "https://example.com",
                        "subreddit": "test",
                        "permalink": "/r/test/comments/x1/minimal/"
                    }}
                ],
                "after": "t3_x1"
            }
        });

        let envelope: ListingEnvelope = serde_json::from_value(payload).unwrap();
        assert_eq!(envelope.data.after.as_deref(), Some("t3_x1"));

        let raw = envelope.data.children.into_iter().next().unwrap().data;
        let post = normalize_post(raw).unwrap();
        assert_eq!(post.author, "[deleted]");
        assert_eq!(post.selftext, "");
        assert!(!post.is_video);
        assert!(!post.over_18);
        assert_eq!(post.domain, "");
        assert!(post.upvote_ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_cursor_deserializes_as_none() {
        let payload = serde_json::json!({"data": {"children": []}});
        let envelope: ListingEnvelope = serde_json::from_value(payload).unwrap();
        assert!(envelope.data.after.is_none());
        assert!(envelope.data.children.is_empty());
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        // Missing the required `title` field.
        let payload = serde_json::json!({
            "data": {"children": [{"data": {"id": "x1"}}], "after": null}
        });
        assert!(serde_json::from_value::<ListingEnvelope>(payload).is_err());
    }

    #[test]
    fn test_error_message_prefixes() {
        assert!(FetchError::Proxy("boom".into())
            .to_string()
            .starts_with("Proxy error"));
        assert!(FetchError::Timeout("boom".into())
            .to_string()
            .starts_with("Request timeout"));
        assert!(FetchError::Request("boom".into())
            .to_string()
            .starts_with("Request error"));
        assert!(FetchError::Parsing("boom".into())
            .to_string()
            .starts_with("Parsing error"));
    }
}
