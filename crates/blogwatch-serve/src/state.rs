//! Application state and memoized data access.

use std::sync::Arc;

use crate::analytics::{self, BlogStats};
use crate::cache::TtlCell;
use crate::config::Config;
use crate::error::ApiError;
use crate::upstream::{BlogRecord, UpstreamClient};

/// Shared application state available to all request handlers.
///
/// The cache cells live here rather than in process-wide statics, so every
/// state (and every test) gets its own isolated cache lifetime.
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream blog API.
    pub upstream: UpstreamClient,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Cached raw blog list.
    blog_cache: TtlCell<Vec<BlogRecord>>,

    /// Cached derived statistics.
    stats_cache: TtlCell<BlogStats>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config)?;
        let ttl = config.cache_ttl;

        Ok(Self {
            upstream,
            config: Arc::new(config),
            blog_cache: TtlCell::new(ttl),
            stats_cache: TtlCell::new(ttl),
        })
    }

    /// Blog list, fetched from upstream at most once per TTL window.
    pub async fn cached_blogs(&self) -> Result<Vec<BlogRecord>, ApiError> {
        let upstream = self.upstream.clone();
        self.blog_cache
            .get_or_refresh(move || async move { upstream.fetch_blogs().await })
            .await
            .map_err(ApiError::from)
    }

    /// Derived statistics, recomputed at most once per TTL window.
    ///
    /// The producer reads through `cached_blogs`, mirroring the two cache
    /// layers: a stats refresh reuses a fresh blog list without refetching.
    pub async fn cached_stats(&self) -> Result<BlogStats, ApiError> {
        let state = self.clone();
        self.stats_cache
            .get_or_refresh(move || async move {
                let blogs = state.cached_blogs().await?;
                analytics::compute_stats(&blogs)
            })
            .await
            .map_err(ApiError::from)
    }
}
