//! Blog title search endpoint.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::upstream::BlogRecord;

/// Query parameters for blog search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Substring to match against blog titles, case-insensitively.
    pub query: Option<String>,
}

/// `GET /api/blog-search?query=<q>`
///
/// Returns the blog records whose title contains the query substring,
/// case-insensitively, in upstream order. The blog list is read through
/// the cache; the filter itself runs per request.
pub async fn blog_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BlogRecord>>, ApiError> {
    let query = match params.query {
        Some(query) if !query.is_empty() => query,
        _ => {
            return Err(ApiError::BadRequest(
                "query parameter \"query\" is required".to_string(),
            ));
        }
    };

    let blogs = state.cached_blogs().await?;
    Ok(Json(filter_by_title(&blogs, &query)))
}

/// Case-insensitive substring filter over blog titles, order preserved.
fn filter_by_title(blogs: &[BlogRecord], query: &str) -> Vec<BlogRecord> {
    let needle = query.to_lowercase();
    blogs
        .iter()
        .filter(|blog| blog.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
