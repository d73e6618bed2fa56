use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::{MAX_LIMIT, MAX_PAGES, PAGE_COURTESY_DELAY};
use crate::reddit::listing::{fetch_listing_page, FetchError, ListingQuery, Post};
use crate::reddit::subreddit::extract_subreddit;

/// Listing sort order. Unrecognized values fall back to `hot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }

    /// Lenient parse: anything unrecognized falls back to the default.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "new" => Self::New,
            "top" => Self::Top,
            "rising" => Self::Rising,
            _ => Self::Hot,
        }
    }
}

/// Time window for `top`-style listings. Unrecognized values fall back to `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Hour,
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl Timeframe {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    /// Lenient parse: anything unrecognized falls back to the default.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "hour" => Self::Hour,
            "day" => Self::Day,
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::All,
        }
    }
}

/// Parameters for a multi-page scrape of one subreddit.
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    /// Free-form subreddit reference: full URL, `r/name`, or bare name.
    pub input: String,
    pub sort: SortMode,
    pub limit: u32,
    pub timeframe: Timeframe,
    pub pages: u32,
    pub proxy: Option<String>,
    pub delay_secs: f64,
}

impl ScrapeParams {
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            sort: SortMode::default(),
            limit: 25,
            timeframe: Timeframe::default(),
            pages: 1,
            proxy: None,
            delay_secs: 0.0,
        }
    }
}

/// Accumulated result of a multi-page scrape.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub subreddit: String,
    pub posts: Vec<Post>,
    pub total_count: usize,
    pub pages_scraped: u32,
    pub sort: SortMode,
    pub timeframe: Timeframe,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Could not extract subreddit name from input")]
    InvalidInput,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Walk the listing cursor across up to `pages` pages, accumulating posts.
///
/// A failure on the first page aborts the whole scrape: the target is
/// unreachable. A failure on a later page stops the loop and returns what was
/// accumulated so far as a success; callers can compare `pages_scraped`
/// against the requested page count to detect the short stop. The cursor is
/// treated as opaque and only ever passed back verbatim.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidInput`] when no subreddit name can be
/// extracted from the input, or the first page's [`FetchError`] when it fails.
pub async fn scrape_subreddit(
    config: &Config,
    params: &ScrapeParams,
) -> Result<ScrapeOutcome, ScrapeError> {
    let subreddit = extract_subreddit(params.input.trim()).ok_or(ScrapeError::InvalidInput)?;

    let pages = params.pages.clamp(1, MAX_PAGES);
    let limit = params.limit.min(MAX_LIMIT);

    let mut all_posts: Vec<Post> = Vec::new();
    let mut after: Option<String> = None;
    let mut pages_scraped = 0u32;

    for page in 0..pages {
        let query = ListingQuery {
            subreddit: &subreddit,
            sort: params.sort,
            timeframe: params.timeframe,
            limit,
            after: after.as_deref(),
            proxy: params.proxy.as_deref(),
            delay_secs: params.delay_secs,
        };

        let listing = match fetch_listing_page(config, &query).await {
            Ok(listing) => listing,
            Err(e) if page == 0 => return Err(e.into()),
            Err(e) => {
                warn!(subreddit = %subreddit, page, "Stopping pagination after failure: {e}");
                break;
            }
        };

        pages_scraped += 1;
        let count = listing.posts.len();
        debug!(subreddit = %subreddit, page, count, "Fetched listing page");

        all_posts.extend(listing.posts);
        after = listing.after;

        // No more posts available
        if after.is_none() || count == 0 {
            break;
        }

        if page < pages - 1 {
            tokio::time::sleep(PAGE_COURTESY_DELAY).await;
        }
    }

    let total_count = all_posts.len();
    Ok(ScrapeOutcome {
        subreddit,
        posts: all_posts,
        total_count,
        pages_scraped,
        sort: params.sort,
        timeframe: params.timeframe,
    })
}
