//! Shared constants used across the application.

use std::time::Duration;

/// Base URL prefixed to the relative permalink returned by the listing API.
pub const PERMALINK_BASE_URL: &str = "https://reddit.com";

/// Upstream hard cap on posts per listing page.
pub const MAX_LIMIT: u32 = 100;

/// Maximum number of listing pages fetched per scrape request.
pub const MAX_PAGES: u32 = 10;

/// Floor applied to the configurable per-request delay.
pub const MIN_DELAY_SECS: f64 = 1.0;

/// Fixed pause between listing pages. Never applied after the last page.
pub const PAGE_COURTESY_DELAY: Duration = Duration::from_secs(1);

/// Browser user agents rotated per listing request.
///
/// These are realistic browser signatures that make listing fetches
/// indistinguishable from normal browser traffic.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/91.0.864.59",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
];
