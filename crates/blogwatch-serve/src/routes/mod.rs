//! API route definitions.

mod health;
mod search;
mod stats;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `GET /health` - Health check
/// - `GET /api/blog-stats` - Aggregate blog statistics
/// - `GET /api/blog-search?query=<q>` - Case-insensitive title search
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/blog-stats", get(stats::blog_stats))
        .route("/api/blog-search", get(search::blog_search))
        .with_state(state)
}
