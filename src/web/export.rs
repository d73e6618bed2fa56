use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::reddit::Post;

/// Handler for the text export route (POST /api/export-text).
///
/// Renders a previously-fetched post list as a readable plain-text document.
/// Does not fetch or validate anything; the posts are assumed normalized.
pub async fn export_text(Json(body): Json<ExportBody>) -> Response {
    let Some(posts) = body.posts else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "No data provided for export"})),
        )
            .into_response();
    };

    let subreddit = body.subreddit.unwrap_or_else(|| "Unknown".to_string());
    let total_count = body.total_count.unwrap_or(posts.len());

    let text_content = render_posts_text(&posts, &subreddit, total_count);
    let filename = export_filename(&subreddit);

    info!(subreddit = %subreddit, posts = posts.len(), "Export rendered");

    Json(json!({
        "success": true,
        "text_content": text_content,
        "filename": filename,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    posts: Option<Vec<Post>>,
    subreddit: Option<String>,
    total_count: Option<usize>,
}

/// Render posts as a readable text document.
///
/// Deterministic except for the embedded export timestamp.
#[must_use]
pub fn render_posts_text(posts: &[Post], subreddit: &str, total_count: usize) -> String {
    let mut text = String::new();

    text.push_str(&format!("Reddit Posts from r/{subreddit}\n"));
    text.push_str(&format!("Total Posts: {total_count}\n"));
    text.push_str(&format!(
        "Exported on: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));
    text.push_str(&"=".repeat(80));
    text.push_str("\n\n");

    for (i, post) in posts.iter().enumerate() {
        text.push_str(&format!("POST #{}\n", i + 1));
        text.push_str(&format!("Title: {}\n", post.title));
        text.push_str(&format!("Author: u/{}\n", post.author));
        text.push_str(&format!("Score: {} points\n", post.score));
        text.push_str(&format!("Comments: {}\n", post.num_comments));
        text.push_str(&format!("Upvote Ratio: {:.0}%\n", post.upvote_ratio * 100.0));
        text.push_str(&format!("Posted: {}\n", post.created_utc));
        text.push_str(&format!("URL: {}\n", post.url));
        text.push_str(&format!("Reddit Link: {}\n", post.permalink));

        if !post.selftext.trim().is_empty() {
            text.push_str(&format!("Content:\n{}\n", post.selftext));
        }

        text.push_str(&"-".repeat(60));
        text.push_str("\n\n");
    }

    text
}

/// Suggested filename embedding the subreddit and a compact timestamp.
#[must_use]
pub fn export_filename(subreddit: &str) -> String {
    format!(
        "reddit_{}_{}.txt",
        subreddit,
        Utc::now().format("%Y%m%d_%H%M%S")
    )
}
