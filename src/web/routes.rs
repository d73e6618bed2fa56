use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::export;
use super::AppState;
use crate::reddit::{
    extract_subreddit, scrape_subreddit, Post, ScrapeError, ScrapeOutcome, ScrapeParams, SortMode,
    Timeframe,
};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/scrape", post(scrape))
        .route("/api/validate", post(validate))
        .route("/api/export-text", post(export::export_text))
        .route("/healthz", get(health))
}

// ========== Scrape ==========

#[derive(Debug, Deserialize)]
pub struct ScrapeBody {
    input: Option<String>,
    sort: Option<String>,
    limit: Option<u32>,
    timeframe: Option<String>,
    pages: Option<u32>,
    proxy: Option<String>,
    delay: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ScrapeResponse {
    success: bool,
    subreddit: String,
    posts: Vec<Post>,
    total_count: usize,
    pages_scraped: u32,
    sort: SortMode,
    timeframe: Timeframe,
}

impl From<ScrapeOutcome> for ScrapeResponse {
    fn from(outcome: ScrapeOutcome) -> Self {
        Self {
            success: true,
            subreddit: outcome.subreddit,
            posts: outcome.posts,
            total_count: outcome.total_count,
            pages_scraped: outcome.pages_scraped,
            sort: outcome.sort,
            timeframe: outcome.timeframe,
        }
    }
}

async fn scrape(State(state): State<AppState>, Json(body): Json<ScrapeBody>) -> Response {
    let Some(input) = body.input else {
        return error_response(StatusCode::BAD_REQUEST, "Missing input parameter");
    };

    let input = input.trim().to_string();
    if input.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Input cannot be empty");
    }

    let params = ScrapeParams {
        input,
        sort: body
            .sort
            .as_deref()
            .map(SortMode::parse_or_default)
            .unwrap_or_default(),
        limit: body.limit.unwrap_or(state.config.default_limit),
        timeframe: body
            .timeframe
            .as_deref()
            .map(Timeframe::parse_or_default)
            .unwrap_or_default(),
        pages: body.pages.unwrap_or(1),
        proxy: body
            .proxy
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        delay_secs: body
            .delay
            .unwrap_or(state.config.default_delay_secs)
            .max(crate::constants::MIN_DELAY_SECS),
    };

    match scrape_subreddit(&state.config, &params).await {
        Ok(outcome) => Json(ScrapeResponse::from(outcome)).into_response(),
        Err(ScrapeError::InvalidInput) => error_response(
            StatusCode::BAD_REQUEST,
            "Could not extract subreddit name from input",
        ),
        Err(ScrapeError::Fetch(e)) => {
            error!("Scrape failed on first page: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "posts": [],
                    "after": null,
                    "count": 0,
                })),
            )
                .into_response()
        }
    }
}

// ========== Validate ==========

#[derive(Debug, Deserialize)]
pub struct ValidateBody {
    input: Option<String>,
}

async fn validate(Json(body): Json<ValidateBody>) -> Response {
    let Some(input) = body.input else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"valid": false, "error": "Missing input parameter"})),
        )
            .into_response();
    };

    let input = input.trim();
    if input.is_empty() {
        return Json(json!({"valid": false, "error": "Input cannot be empty"})).into_response();
    }

    match extract_subreddit(input) {
        Some(subreddit) => Json(json!({
            "valid": true,
            "subreddit": subreddit,
            "input_type": if input.contains('/') { "url" } else { "name" },
        }))
        .into_response(),
        None => Json(json!({
            "valid": false,
            "error": "Could not extract subreddit name from input",
        }))
        .into_response(),
    }
}

// ========== Health ==========

async fn health() -> &'static str {
    "ok"
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "error": message}))).into_response()
}
