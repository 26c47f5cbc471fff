//! Blog statistics endpoint.

use axum::Json;
use axum::extract::State;

use crate::analytics::BlogStats;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/blog-stats`
///
/// Returns aggregate statistics over the upstream blog list. The response
/// is memoized; within the freshness window repeated requests cost neither
/// an upstream fetch nor a recomputation.
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, ApiError> {
    let stats = state.cached_stats().await?;
    Ok(Json(stats))
}
