//! Client for the third-party blog API.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;

/// Header carrying the static upstream credential.
const SECRET_HEADER: &str = "x-hasura-admin-secret";

/// One blog record as served by the upstream API.
///
/// Only `title` is examined; every other field rides along untouched and is
/// re-serialized exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRecord {
    pub title: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Upstream response envelope.
#[derive(Debug, Deserialize)]
struct BlogsResponse {
    blogs: Vec<BlogRecord>,
}

/// HTTP client for the upstream blog endpoint.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    secret: String,
}

impl UpstreamClient {
    /// Build a client from configuration. The request timeout bounds every
    /// upstream call so a stalled upstream cannot stall handlers forever.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            http,
            url: config.upstream_url.clone(),
            secret: config.upstream_secret.clone(),
        })
    }

    /// Fetch the full blog list from the upstream API.
    ///
    /// One authenticated GET, no retries. A non-200 response maps to
    /// [`ApiError::Upstream`], a transport failure to [`ApiError::Network`].
    pub async fn fetch_blogs(&self) -> Result<Vec<BlogRecord>, ApiError> {
        let response = self
            .http
            .get(&self.url)
            .header(SECRET_HEADER, &self.secret)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Upstream(status));
        }

        let body: BlogsResponse = response.json().await?;
        tracing::debug!(count = body.blogs.len(), "fetched blogs from upstream");

        Ok(body.blogs)
    }
}
