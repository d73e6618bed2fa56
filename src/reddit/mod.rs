//! Subreddit listing fetching and pagination.

mod listing;
mod proxy;
mod scraper;
mod subreddit;

pub use listing::{fetch_listing_page, FetchError, ListingPage, ListingQuery, Post};
pub use proxy::resolve_proxies;
pub use scraper::{
    scrape_subreddit, ScrapeError, ScrapeOutcome, ScrapeParams, SortMode, Timeframe,
};
pub use subreddit::extract_subreddit;
