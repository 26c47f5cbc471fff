//! Blogwatch Serve - HTTP facade for blog analytics
//!
//! This crate fetches blog records from a third-party REST API and serves
//! aggregate statistics plus a substring search over blog titles. Upstream
//! fetches and the derived statistics are both memoized in single-slot TTL
//! caches, so repeated requests within the freshness window never touch the
//! upstream API.
//!
//! # Architecture
//!
//! - **AppState**: Shared application state (upstream client, configuration,
//!   cache cells)
//! - **TtlCell**: Single-slot TTL cache with concurrent-miss collapsing
//! - **Routes**: Endpoint handlers for stats and search

pub mod analytics;
pub mod cache;
mod config;
mod error;
mod routes;
mod state;
pub mod upstream;

pub use self::cache::TtlCell;
pub use self::config::Config;
pub use self::error::ApiError;
pub use self::routes::router;
pub use self::state::AppState;
