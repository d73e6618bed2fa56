//! Subreddit listing scraper service.
//!
//! An HTTP JSON service that fetches public post listings from Reddit's JSON
//! endpoints for a given subreddit, paginates across listing pages, and
//! re-exports the normalized posts as a readable text document.

pub mod config;
pub mod constants;
pub mod reddit;
pub mod web;
