//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Upstream blog API endpoint.
    pub upstream_url: String,

    /// Static admin secret sent to the upstream API.
    pub upstream_secret: String,

    /// Freshness window for the blog and stats caches.
    pub cache_ttl: Duration,

    /// Request timeout for upstream calls.
    pub upstream_timeout: Duration,
}

/// Default upstream endpoint serving the blog list.
const DEFAULT_UPSTREAM_URL: &str = "https://intent-kit-16.hasura.app/api/rest/blogs";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `BLOGWATCH_UPSTREAM_SECRET`: Admin secret for the upstream blog API
    ///
    /// Optional environment variables:
    /// - `BLOGWATCH_BIND_ADDR`: Full bind address (overrides `PORT`)
    /// - `PORT`: Listen port, bound on all interfaces (default: 3000)
    /// - `BLOGWATCH_UPSTREAM_URL`: Upstream endpoint (default: hasura blog API)
    /// - `BLOGWATCH_CACHE_TTL_SECS`: Cache freshness window (default: 300)
    /// - `BLOGWATCH_UPSTREAM_TIMEOUT_SECS`: Upstream request timeout (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = match std::env::var("BLOGWATCH_BIND_ADDR") {
            Ok(addr) => addr,
            Err(_) => {
                let port: u16 = match std::env::var("PORT") {
                    Ok(raw) => raw
                        .parse()
                        .map_err(|_| anyhow::anyhow!("PORT must be a valid port number: {raw}"))?,
                    Err(_) => 3000,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let upstream_url =
            std::env::var("BLOGWATCH_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let upstream_secret = std::env::var("BLOGWATCH_UPSTREAM_SECRET").map_err(|_| {
            anyhow::anyhow!("BLOGWATCH_UPSTREAM_SECRET environment variable is required")
        })?;

        if upstream_secret.trim().is_empty() {
            anyhow::bail!("BLOGWATCH_UPSTREAM_SECRET must not be empty");
        }

        let cache_ttl_secs: u64 = std::env::var("BLOGWATCH_CACHE_TTL_SECS")
            .ok()
            .map(|raw| {
                raw.parse().map_err(|_| {
                    anyhow::anyhow!("BLOGWATCH_CACHE_TTL_SECS must be a number of seconds: {raw}")
                })
            })
            .transpose()?
            .unwrap_or(300);

        let upstream_timeout_secs: u64 = std::env::var("BLOGWATCH_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .map(|raw| {
                raw.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "BLOGWATCH_UPSTREAM_TIMEOUT_SECS must be a number of seconds: {raw}"
                    )
                })
            })
            .transpose()?
            .unwrap_or(10);

        tracing::info!(
            bind_addr = %bind_addr,
            upstream_url = %upstream_url,
            cache_ttl_secs = cache_ttl_secs,
            upstream_timeout_secs = upstream_timeout_secs,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            upstream_url,
            upstream_secret,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "BLOGWATCH_BIND_ADDR",
        "PORT",
        "BLOGWATCH_UPSTREAM_URL",
        "BLOGWATCH_UPSTREAM_SECRET",
        "BLOGWATCH_CACHE_TTL_SECS",
        "BLOGWATCH_UPSTREAM_TIMEOUT_SECS",
    ];

    /// Helper to run config tests with isolated env vars.
    /// Uses a mutex to prevent concurrent env var races.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[("BLOGWATCH_UPSTREAM_SECRET", "s3cret")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:3000");
            assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
            assert_eq!(config.upstream_secret, "s3cret");
            assert_eq!(config.cache_ttl, Duration::from_secs(300));
            assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("BLOGWATCH_BIND_ADDR", "127.0.0.1:9090"),
                ("BLOGWATCH_UPSTREAM_URL", "http://localhost:4000/blogs"),
                ("BLOGWATCH_UPSTREAM_SECRET", "hunter2"),
                ("BLOGWATCH_CACHE_TTL_SECS", "60"),
                ("BLOGWATCH_UPSTREAM_TIMEOUT_SECS", "5"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.upstream_url, "http://localhost:4000/blogs");
                assert_eq!(config.upstream_secret, "hunter2");
                assert_eq!(config.cache_ttl, Duration::from_secs(60));
                assert_eq!(config.upstream_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn config_port_fallback() {
        with_env_vars(
            &[("BLOGWATCH_UPSTREAM_SECRET", "s"), ("PORT", "8123")],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "0.0.0.0:8123");
            },
        );
    }

    #[test]
    fn config_bind_addr_overrides_port() {
        with_env_vars(
            &[
                ("BLOGWATCH_UPSTREAM_SECRET", "s"),
                ("PORT", "8123"),
                ("BLOGWATCH_BIND_ADDR", "127.0.0.1:5555"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:5555");
            },
        );
    }

    #[test]
    fn config_missing_secret_fails() {
        with_env_vars(&[], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_empty_secret_fails() {
        with_env_vars(&[("BLOGWATCH_UPSTREAM_SECRET", "  ")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_invalid_ttl_fails() {
        with_env_vars(
            &[
                ("BLOGWATCH_UPSTREAM_SECRET", "s"),
                ("BLOGWATCH_CACHE_TTL_SECS", "five minutes"),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn config_invalid_port_fails() {
        with_env_vars(
            &[("BLOGWATCH_UPSTREAM_SECRET", "s"), ("PORT", "70000")],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
